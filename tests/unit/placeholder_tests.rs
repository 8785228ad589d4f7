/*!
 * Local placeholder rendering tests
 */

use lexicard::content::ContentRequest;
use lexicard::resolver::{EchoTranslation, LocalFallback, PlaceholderImage};

#[test]
fn test_placeholder_shouldRenderValidPngAtDefaultSize() {
    let artifact = PlaceholderImage::default().synthesize(&ContentRequest::new("book"));

    let decoded = image::load_from_memory(&artifact.bytes).expect("placeholder must decode");
    assert_eq!(decoded.width(), 400);
    assert_eq!(decoded.height(), 300);
}

#[test]
fn test_placeholder_resolvingSameRequestTwice_yieldsIdenticalBytes() {
    let renderer = PlaceholderImage::default();
    let request = ContentRequest::new("drink");

    assert_eq!(renderer.synthesize(&request), renderer.synthesize(&request));
}

#[test]
fn test_placeholder_withNonLatinWord_shouldStillProduceAnImage() {
    let artifact = PlaceholderImage::default().synthesize(&ContentRequest::new("食べる"));
    assert!(image::load_from_memory(&artifact.bytes).is_ok());
}

#[test]
fn test_placeholder_withEmptyText_shouldStillProduceAnImage() {
    let artifact = PlaceholderImage::default().synthesize(&ContentRequest::new(""));
    assert!(image::load_from_memory(&artifact.bytes).is_ok());
}

#[test]
fn test_echoTranslation_marksNothingPhonetic() {
    let artifact = EchoTranslation.synthesize(&ContentRequest::new("cloud"));

    assert_eq!(artifact.text, "cloud");
    assert!(artifact.kana.is_none());
    assert!(artifact.romaji.is_none());
}
