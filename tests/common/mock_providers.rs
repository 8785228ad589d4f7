/*!
 * Chain construction helpers built on the mock providers.
 *
 * These avoid external API calls in tests: every chain here is made of
 * `MockProvider` instances with predetermined behavior, terminated by the
 * real local fallbacks.
 */

use lexicard::content::{ImageArtifact, TranslationArtifact};
use lexicard::providers::mock::MockProvider;
use lexicard::providers::Provider;
use lexicard::resolver::{EchoTranslation, FallbackChain, PlaceholderImage};

/// A small fixed artifact standing in for a fetched photo
pub fn sample_image() -> ImageArtifact {
    ImageArtifact::new(vec![0xFF, 0xD8, 0xFF, 0xE0], "jpeg")
}

/// A fixed translation artifact
pub fn sample_translation(text: &str) -> TranslationArtifact {
    TranslationArtifact::plain(text)
}

/// An image chain whose providers all succeed/fail as listed
pub fn image_chain(
    providers: Vec<Box<dyn Provider<ImageArtifact>>>,
) -> FallbackChain<ImageArtifact> {
    FallbackChain::new(providers, Box::new(PlaceholderImage::default()))
}

/// A translation chain terminated by the echo fallback
pub fn translation_chain(
    providers: Vec<Box<dyn Provider<TranslationArtifact>>>,
) -> FallbackChain<TranslationArtifact> {
    FallbackChain::new(providers, Box::new(EchoTranslation))
}

/// An image chain with one working provider
pub fn working_image_chain(name: &str) -> FallbackChain<ImageArtifact> {
    image_chain(vec![Box::new(MockProvider::working(name, sample_image()))])
}

/// An image chain where every provider fails
pub fn failing_image_chain() -> FallbackChain<ImageArtifact> {
    image_chain(vec![
        Box::new(MockProvider::<ImageArtifact>::failing("huggingface")),
        Box::new(MockProvider::<ImageArtifact>::unconfigured("pixabay")),
        Box::new(MockProvider::<ImageArtifact>::failing("unsplash")),
    ])
}

/// A translation chain with one working provider
pub fn working_translation_chain(name: &str, text: &str) -> FallbackChain<TranslationArtifact> {
    translation_chain(vec![Box::new(MockProvider::working(
        name,
        sample_translation(text),
    ))])
}

/// A translation chain where every provider fails
pub fn failing_translation_chain() -> FallbackChain<TranslationArtifact> {
    translation_chain(vec![
        Box::new(MockProvider::<TranslationArtifact>::failing("mymemory")),
        Box::new(MockProvider::<TranslationArtifact>::unconfigured("llm")),
    ])
}
