/*!
 * Database record types.
 */

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One stored flashcard: the source word, its target-language
/// representations, and the artifact reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashcardRecord {
    /// Auto-increment identifier; None until inserted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Source word or phrase
    pub source_text: String,

    /// Target-script translation
    pub target_text: String,

    /// Kana reading, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kana: Option<String>,

    /// Romanized reading, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub romaji: Option<String>,

    /// Path of the saved image file, when one was written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,

    /// Provider that produced the image ("local" for the placeholder)
    pub image_provider: String,

    /// Provider that produced the translation ("local" for the echo)
    pub translation_provider: String,

    /// RFC3339 creation timestamp
    pub created_at: String,
}

impl FlashcardRecord {
    /// Create a new unsaved record stamped with the current time
    pub fn new(
        source_text: impl Into<String>,
        target_text: impl Into<String>,
        image_provider: impl Into<String>,
        translation_provider: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            source_text: source_text.into(),
            target_text: target_text.into(),
            kana: None,
            romaji: None,
            image_path: None,
            image_provider: image_provider.into(),
            translation_provider: translation_provider.into(),
            created_at: Utc::now().to_rfc3339(),
        }
    }
}
