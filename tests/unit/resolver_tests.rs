/*!
 * Fallback chain behavior tests.
 *
 * These exercise the ordered-fallback contract with mock providers: first
 * success wins, no retries, one diagnostic per failed attempt, and the local
 * fallback terminating an exhausted chain.
 */

use lexicard::content::{ContentRequest, ImageArtifact, TranslationArtifact};
use lexicard::providers::mock::MockProvider;
use lexicard::resolver::LOCAL_PROVIDER;

use crate::common::mock_providers::{
    failing_image_chain, image_chain, sample_image, sample_translation, translation_chain,
};

#[tokio::test]
async fn test_resolve_withHealthyPrimary_shouldNotConsultSecondaries() {
    let secondary: MockProvider<ImageArtifact> = MockProvider::failing("pixabay");
    let probe = secondary.clone();

    let chain = image_chain(vec![
        Box::new(MockProvider::working("huggingface", sample_image())),
        Box::new(secondary),
    ]);

    let resolution = chain.resolve(&ContentRequest::new("book")).await;

    assert_eq!(resolution.provider, "huggingface");
    assert!(resolution.diagnostics.is_empty());
    assert_eq!(probe.attempts(), 0);
}

#[tokio::test]
async fn test_resolve_withPrimaryDown_shouldFallThroughInOrder() {
    let chain = image_chain(vec![
        Box::new(MockProvider::<ImageArtifact>::failing("huggingface")),
        Box::new(MockProvider::<ImageArtifact>::unconfigured("pixabay")),
        Box::new(MockProvider::working("unsplash", sample_image())),
    ]);

    let resolution = chain.resolve(&ContentRequest::new("car")).await;

    assert_eq!(resolution.provider, "unsplash");
    assert_eq!(resolution.diagnostics.len(), 2);
    assert!(resolution.diagnostics[0].starts_with("huggingface:"));
    assert!(resolution.diagnostics[1].starts_with("pixabay:"));
}

#[tokio::test]
async fn test_resolve_withEverythingDown_shouldProduceLocalPlaceholder() {
    let chain = failing_image_chain();

    let resolution = chain.resolve(&ContentRequest::new("water")).await;

    assert_eq!(resolution.provider, LOCAL_PROVIDER);
    assert!(resolution.is_fallback());
    assert_eq!(resolution.diagnostics.len(), 3);
    assert_eq!(resolution.artifact.format, "png");
    assert!(!resolution.artifact.bytes.is_empty());
}

#[tokio::test]
async fn test_resolve_withEverythingDown_translationEchoesNativeForm() {
    let chain = translation_chain(vec![
        Box::new(MockProvider::<TranslationArtifact>::failing("mymemory")),
        Box::new(MockProvider::<TranslationArtifact>::failing("llm")),
    ]);

    let request = ContentRequest::new("book").with_native("本");
    let resolution = chain.resolve(&request).await;

    assert!(resolution.is_fallback());
    assert_eq!(resolution.artifact.text, "本");
}

#[tokio::test]
async fn test_resolve_failedProviderIsAttemptedExactlyOnce() {
    let flaky: MockProvider<TranslationArtifact> = MockProvider::failing("mymemory");
    let probe = flaky.clone();

    let chain = translation_chain(vec![
        Box::new(flaky),
        Box::new(MockProvider::working("llm", sample_translation("本"))),
    ]);

    chain.resolve(&ContentRequest::new("book")).await;

    assert_eq!(probe.attempts(), 1);
}

#[tokio::test]
async fn test_resolve_sameChainHandlesConsecutiveRequestsIndependently() {
    let chain = translation_chain(vec![Box::new(MockProvider::intermittent(
        "mymemory",
        sample_translation("本"),
        2,
    ))]);

    // First request succeeds remotely, second hits the intermittent failure
    // and degrades; neither affects the other
    let first = chain.resolve(&ContentRequest::new("book")).await;
    let second = chain.resolve(&ContentRequest::new("book")).await;

    assert_eq!(first.provider, "mymemory");
    assert!(second.is_fallback());
    assert_eq!(second.diagnostics.len(), 1);
}
