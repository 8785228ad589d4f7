/*!
 * Core content types shared across providers and the fallback resolver.
 *
 * A `ContentRequest` describes one user action (a word to illustrate and
 * translate); providers turn it into an `ImageArtifact` or a
 * `TranslationArtifact`. All of these values live for a single
 * request/response cycle and carry no ownership complexity.
 */

use serde::{Deserialize, Serialize};

/// A single content request: the word or phrase to work on plus optional
/// metadata used to build provider-specific queries.
///
/// Immutable once constructed; created fresh per user action and discarded
/// after the call completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRequest {
    /// The source word or phrase
    pub text: String,

    /// Optional category tag (e.g. "noun", "verb")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Keyword hints for stock-photo queries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,

    /// Native-script form when already known (seeded from the built-in
    /// vocabulary list)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native: Option<String>,
}

impl ContentRequest {
    /// Create a request for a bare word with no metadata
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: None,
            keywords: Vec::new(),
            native: None,
        }
    }

    /// Attach a category tag
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Attach keyword hints
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    /// Attach a known native-script form
    pub fn with_native(mut self, native: impl Into<String>) -> Self {
        self.native = Some(native.into());
        self
    }

    /// Build a stock-photo search query from the keyword hints, falling back
    /// to the raw text, with the category appended for better results
    pub fn photo_query(&self) -> String {
        let mut query = if self.keywords.is_empty() {
            self.text.clone()
        } else {
            self.keywords
                .iter()
                .take(2)
                .cloned()
                .collect::<Vec<_>>()
                .join("+")
        };

        query = query.replace(' ', "+");

        if let Some(category) = &self.category {
            query.push('+');
            query.push_str(category);
        }

        query
    }
}

/// An image produced by a provider or by the local placeholder renderer
#[derive(Debug, Clone, PartialEq)]
pub struct ImageArtifact {
    /// Encoded image bytes
    pub bytes: Vec<u8>,

    /// Image format label ("png", "jpeg", ...)
    pub format: String,
}

impl ImageArtifact {
    /// Create an artifact from encoded bytes
    pub fn new(bytes: Vec<u8>, format: impl Into<String>) -> Self {
        Self {
            bytes,
            format: format.into(),
        }
    }
}

/// A translation bundle: target-language text plus up to two phonetic
/// variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationArtifact {
    /// Translated text in the target script
    pub text: String,

    /// Kana reading, when the provider supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kana: Option<String>,

    /// Romanized reading, when the provider supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub romaji: Option<String>,
}

impl TranslationArtifact {
    /// Create a translation with no phonetic variants
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kana: None,
            romaji: None,
        }
    }
}
