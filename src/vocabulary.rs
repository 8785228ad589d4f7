/*!
 * Built-in seed vocabulary.
 *
 * A small JLPT N5 word list used to enrich a bare request with the category,
 * keyword hints and native form the providers can make use of. Lookup is
 * case-insensitive on the English side.
 */

use once_cell::sync::Lazy;

use crate::content::ContentRequest;

/// One seed vocabulary entry
#[derive(Debug, Clone)]
pub struct VocabEntry {
    /// Native-script form
    pub native: &'static str,
    /// English gloss
    pub english: &'static str,
    /// Part-of-speech category
    pub category: &'static str,
    /// Example sentence in the native script
    pub example: &'static str,
    /// Keyword hints for image search
    pub keywords: &'static [&'static str],
}

/// The embedded JLPT N5 seed list
pub static VOCABULARY: Lazy<Vec<VocabEntry>> = Lazy::new(|| {
    vec![
        VocabEntry {
            native: "本",
            english: "book",
            category: "noun",
            example: "この本は面白いです。",
            keywords: &["reading", "literature"],
        },
        VocabEntry {
            native: "車",
            english: "car",
            category: "noun",
            example: "赤い車が好きです。",
            keywords: &["transportation", "vehicle"],
        },
        VocabEntry {
            native: "水",
            english: "water",
            category: "noun",
            example: "水を飲みます。",
            keywords: &["drink", "liquid"],
        },
        VocabEntry {
            native: "食べる",
            english: "eat",
            category: "verb",
            example: "寿司を食べます。",
            keywords: &["food", "meal"],
        },
        VocabEntry {
            native: "飲む",
            english: "drink",
            category: "verb",
            example: "お茶を飲みます。",
            keywords: &["beverage", "drink"],
        },
    ]
});

/// Look up a seed entry by its English gloss, case-insensitively
pub fn find_entry(english: &str) -> Option<&'static VocabEntry> {
    let needle = english.trim().to_lowercase();
    VOCABULARY.iter().find(|e| e.english == needle)
}

/// Build a content request for a word, enriched with seed metadata when the
/// word is part of the built-in list
pub fn enrich_request(text: &str) -> ContentRequest {
    match find_entry(text) {
        Some(entry) => ContentRequest::new(text.trim())
            .with_category(entry.category)
            .with_keywords(entry.keywords.iter().map(|k| k.to_string()).collect())
            .with_native(entry.native),
        None => ContentRequest::new(text.trim()),
    }
}
