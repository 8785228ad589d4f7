/*!
 * Provider implementations for the content backends.
 *
 * This module contains client implementations for the remote services a
 * flashcard is assembled from:
 * - HuggingFace: hosted diffusion-model image generation
 * - Pixabay: stock-photo lookup (key-based)
 * - Unsplash: stock-photo redirect (keyless)
 * - MyMemory: free translation API
 * - Llm: OpenAI-compatible chat endpoint used for translation with phonetics
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::content::ContentRequest;
use crate::errors::ProviderError;

/// Common trait for all content providers.
///
/// A provider produces one kind of artifact for a request. Implementations
/// perform a single network call per attempt and report every failure as a
/// `ProviderError`; the fallback resolver converts those into diagnostics and
/// moves on to the next provider in the chain.
#[async_trait]
pub trait Provider<A>: Send + Sync + Debug {
    /// Stable provider name used to tag resolutions and stored cards
    fn name(&self) -> &str;

    /// Attempt to produce an artifact for the request
    ///
    /// # Arguments
    /// * `request` - The content request to fulfil
    ///
    /// # Returns
    /// * `Result<A, ProviderError>` - The artifact or the failure reason
    async fn attempt(&self, request: &ContentRequest) -> Result<A, ProviderError>;
}

/// Convert a reqwest transport error into the provider error taxonomy
pub(crate) fn transport_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() || error.is_connect() {
        ProviderError::ConnectionError(error.to_string())
    } else {
        ProviderError::RequestFailed(error.to_string())
    }
}

pub mod huggingface;
pub mod llm;
pub mod mock;
pub mod mymemory;
pub mod pixabay;
pub mod unsplash;
