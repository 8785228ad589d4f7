/*!
 * Seed vocabulary and prompt tests
 */

use lexicard::content::ContentRequest;
use lexicard::prompt::contextual_prompt;
use lexicard::vocabulary::{enrich_request, find_entry, VOCABULARY};

#[test]
fn test_vocabulary_everyEntryIsComplete() {
    for entry in VOCABULARY.iter() {
        assert!(!entry.native.is_empty());
        assert!(!entry.english.is_empty());
        assert!(!entry.example.is_empty());
        assert!(!entry.keywords.is_empty(), "entry '{}' has no keywords", entry.english);
    }
}

#[test]
fn test_vocabulary_englishGlossesAreUniqueAndLowercase() {
    let mut seen = std::collections::HashSet::new();
    for entry in VOCABULARY.iter() {
        assert_eq!(entry.english, entry.english.to_lowercase());
        assert!(seen.insert(entry.english), "duplicate gloss '{}'", entry.english);
    }
}

#[test]
fn test_findEntry_trimsAndIgnoresCase() {
    assert!(find_entry(" Drink ").is_some());
    assert!(find_entry("DRINK").is_some());
    assert!(find_entry("drinking").is_none());
}

#[test]
fn test_enrichRequest_seedKeywordsDriveThePhotoQuery() {
    let request = enrich_request("book");
    assert_eq!(request.photo_query(), "reading+literature+noun");
}

#[test]
fn test_enrichRequest_unknownWordFallsBackToBareText() {
    let request = enrich_request("giraffe");
    assert_eq!(request.photo_query(), "giraffe");
}

#[test]
fn test_contextualPrompt_usesEnrichedCategory() {
    let request = enrich_request("eat");
    let prompt = contextual_prompt(&request);

    assert!(prompt.contains("eat"));
    assert!(prompt.contains("(verb)"));
}

#[test]
fn test_contextualPrompt_neverEmitsUnfilledTemplate() {
    for _ in 0..20 {
        let prompt = contextual_prompt(&ContentRequest::new("book"));
        assert!(!prompt.contains("{}"));
    }
}
