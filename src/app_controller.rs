/*!
 * Application controller.
 *
 * The controller is the explicit application state shared by the CLI and the
 * HTTP surface: configuration, the two fallback chains, the flashcard
 * repository and the action limiter, with no ambient singletons. One
 * controller instance handles one process.
 */

use anyhow::Result;
use log::{info, warn};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

use crate::app_config::{
    Config, Credentials, DuplicatePolicy, ImageProviderKind, TranslationProviderKind,
};
use crate::content::{ContentRequest, ImageArtifact, TranslationArtifact};
use crate::database::{FlashcardRecord, Repository};
use crate::errors::{AppError, StorageError};
use crate::providers::huggingface::HuggingFace;
use crate::providers::llm::LlmTranslator;
use crate::providers::mymemory::MyMemory;
use crate::providers::pixabay::Pixabay;
use crate::providers::unsplash::Unsplash;
use crate::providers::Provider;
use crate::resolver::{ActionLimiter, EchoTranslation, FallbackChain, PlaceholderImage};
use crate::vocabulary;

/// The result of one successful card creation
#[derive(Debug, Clone)]
pub struct CardOutcome {
    /// The stored card
    pub card: FlashcardRecord,
    /// Diagnostics collected from failed provider attempts, in chain order
    /// (translation chain first, then image chain)
    pub diagnostics: Vec<String>,
}

/// Main application controller
pub struct Controller {
    /// Application configuration
    config: Config,
    /// Flashcard repository
    repository: Repository,
    /// Image fallback chain
    image_chain: FallbackChain<ImageArtifact>,
    /// Translation fallback chain
    translation_chain: FallbackChain<TranslationArtifact>,
    /// Rolling-window guard for user-initiated creations
    limiter: Mutex<ActionLimiter>,
}

impl Controller {
    /// Create a controller with chains built from the configuration and the
    /// environment credentials
    pub fn new(config: Config, credentials: &Credentials, repository: Repository) -> Self {
        let image_chain = build_image_chain(&config, credentials);
        let translation_chain = build_translation_chain(&config, credentials);
        Self::with_chains(config, repository, image_chain, translation_chain)
    }

    /// Create a controller with explicit chains (used by tests to inject
    /// mock providers)
    pub fn with_chains(
        config: Config,
        repository: Repository,
        image_chain: FallbackChain<ImageArtifact>,
        translation_chain: FallbackChain<TranslationArtifact>,
    ) -> Self {
        let limiter = ActionLimiter::new(
            config.rate_limit.max_actions_per_minute,
            Duration::from_secs(60),
        );

        Self {
            config,
            repository,
            image_chain,
            translation_chain,
            limiter: Mutex::new(limiter),
        }
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The flashcard repository
    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// Build an enriched content request for a word, applying caller-supplied
    /// metadata on top of the seed vocabulary
    pub fn request_for(
        &self,
        text: &str,
        category: Option<String>,
        keywords: Vec<String>,
    ) -> ContentRequest {
        let mut request = vocabulary::enrich_request(text);
        if category.is_some() {
            request.category = category;
        }
        if !keywords.is_empty() {
            request.keywords = keywords;
        }
        request
    }

    /// Create one flashcard: validate, rate-limit, resolve translation and
    /// image through their fallback chains, store the image file and the
    /// card record.
    ///
    /// Failures never cross the boundary of this single action; a provider
    /// failure only shows up as a diagnostic on the outcome.
    pub async fn create_card(&self, request: ContentRequest) -> Result<CardOutcome, AppError> {
        if request.text.trim().is_empty() {
            return Err(AppError::Validation("Please enter a word".to_string()));
        }

        {
            let mut limiter = self.limiter.lock();
            if let Err(remaining) = limiter.try_acquire() {
                return Err(AppError::RateLimited(format!(
                    "At most {} cards per minute; try again in {}s",
                    limiter.limit(),
                    remaining.as_secs().max(1)
                )));
            }
        }

        if self.config.storage.duplicate_policy == DuplicatePolicy::Reject {
            let existing = self
                .repository
                .find_by_source(&request.text)
                .await
                .map_err(|e| StorageError::Database(e.to_string()))?;

            if let Some(card) = existing {
                return Err(AppError::Duplicate(format!(
                    "'{}' already has card #{}",
                    request.text,
                    card.id.unwrap_or_default()
                )));
            }
        }

        info!("Creating flashcard for '{}'", request.text);

        let translation = self.translation_chain.resolve(&request).await;
        let image = self.image_chain.resolve(&request).await;

        if translation.is_fallback() {
            warn!(
                "All translation providers failed for '{}'; stored the echo pseudo-translation",
                request.text
            );
        }
        if image.is_fallback() {
            warn!(
                "All image providers failed for '{}'; stored the local placeholder",
                request.text
            );
        }

        let image_path = self.save_image(&request, &image.artifact)?;

        let mut record = FlashcardRecord::new(
            request.text.clone(),
            translation.artifact.text.clone(),
            image.provider.clone(),
            translation.provider.clone(),
        );
        record.kana = translation.artifact.kana.clone();
        record.romaji = translation.artifact.romaji.clone();
        record.image_path = Some(image_path.to_string_lossy().to_string());

        let card = self
            .repository
            .insert(&record)
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;

        let mut diagnostics = translation.diagnostics;
        diagnostics.extend(image.diagnostics);

        Ok(CardOutcome { card, diagnostics })
    }

    /// Fetch one card by id
    pub async fn get_card(&self, id: i64) -> Result<Option<FlashcardRecord>, AppError> {
        self.repository
            .get(id)
            .await
            .map_err(|e| StorageError::Database(e.to_string()).into())
    }

    /// List the most recent cards, newest first
    pub async fn list_cards(&self, limit: u32) -> Result<Vec<FlashcardRecord>, AppError> {
        self.repository
            .list_recent(limit)
            .await
            .map_err(|e| StorageError::Database(e.to_string()).into())
    }

    /// Write the image artifact under the images directory and return its
    /// path. Directory creation is on demand; failure aborts the action.
    fn save_image(
        &self,
        request: &ContentRequest,
        artifact: &ImageArtifact,
    ) -> Result<PathBuf, StorageError> {
        let dir = &self.config.storage.images_dir;
        std::fs::create_dir_all(dir).map_err(|e| {
            StorageError::ImageStore(format!("Failed to create images directory {:?}: {}", dir, e))
        })?;

        let filename = format!("{}-{}.{}", slugify(&request.text), Uuid::new_v4(), artifact.format);
        let path = dir.join(filename);

        std::fs::write(&path, &artifact.bytes).map_err(|e| {
            StorageError::ImageStore(format!("Failed to write image {:?}: {}", path, e))
        })?;

        Ok(path)
    }
}

/// Build the image chain in the configured provider order, terminated by the
/// local placeholder renderer
pub fn build_image_chain(
    config: &Config,
    credentials: &Credentials,
) -> FallbackChain<ImageArtifact> {
    let providers: Vec<Box<dyn Provider<ImageArtifact>>> = config
        .image
        .order
        .iter()
        .map(|kind| -> Box<dyn Provider<ImageArtifact>> {
            match kind {
                ImageProviderKind::HuggingFace => Box::new(HuggingFace::new(
                    credentials.huggingface_token.clone(),
                    config.image.huggingface_endpoint.clone(),
                    config.image.timeout_secs,
                )),
                ImageProviderKind::Pixabay => Box::new(Pixabay::new(
                    credentials.pixabay_key.clone(),
                    config.image.pixabay_endpoint.clone(),
                    config.image.timeout_secs,
                )),
                ImageProviderKind::Unsplash => Box::new(Unsplash::new(
                    config.image.unsplash_endpoint.clone(),
                    config.image.timeout_secs,
                )),
            }
        })
        .collect();

    FallbackChain::new(providers, Box::new(PlaceholderImage::default()))
}

/// Build the translation chain in the configured provider order, terminated
/// by the echo pseudo-translation
pub fn build_translation_chain(
    config: &Config,
    credentials: &Credentials,
) -> FallbackChain<TranslationArtifact> {
    let providers: Vec<Box<dyn Provider<TranslationArtifact>>> = config
        .translation
        .order
        .iter()
        .map(|kind| -> Box<dyn Provider<TranslationArtifact>> {
            match kind {
                TranslationProviderKind::MyMemory => Box::new(MyMemory::new(
                    config.translation.mymemory_endpoint.clone(),
                    config.source_language.clone(),
                    config.target_language.clone(),
                    config.translation.timeout_secs,
                )),
                TranslationProviderKind::Llm => Box::new(LlmTranslator::new(
                    credentials.llm_api_key.clone(),
                    config.translation.llm_endpoint.clone(),
                    config.translation.llm_model.clone(),
                    config.target_language_name().to_string(),
                    config.translation.timeout_secs,
                )),
            }
        })
        .collect();

    FallbackChain::new(providers, Box::new(EchoTranslation))
}

/// Reduce a word to a filesystem-friendly slug
fn slugify(text: &str) -> String {
    let slug: String = text
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();

    let slug = slug.trim_matches('-').to_string();
    if slug.is_empty() {
        "card".to_string()
    } else {
        slug
    }
}
