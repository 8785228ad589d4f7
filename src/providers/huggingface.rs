use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::content::{ContentRequest, ImageArtifact};
use crate::errors::ProviderError;
use crate::prompt::contextual_prompt;
use crate::providers::{transport_error, Provider};

/// Default inference endpoint (Stable Diffusion v1.5)
const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/runwayml/stable-diffusion-v1-5";

/// HuggingFace inference client for hosted diffusion-model image generation
#[derive(Debug)]
pub struct HuggingFace {
    /// HTTP client for API requests
    client: Client,
    /// Bearer token; empty means the provider is degraded to always-fails
    api_token: String,
    /// Full model inference URL
    endpoint: String,
}

/// Inference request payload
#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    /// The image-generation prompt
    inputs: &'a str,
}

impl HuggingFace {
    /// Create a new HuggingFace client.
    ///
    /// An empty token does not abort anything; the provider simply fails
    /// every attempt with a missing-credentials diagnostic so the fallback
    /// chain can move on.
    pub fn new(api_token: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_token: api_token.into(),
            endpoint: if endpoint.is_empty() {
                DEFAULT_ENDPOINT.to_string()
            } else {
                endpoint
            },
        }
    }
}

#[async_trait]
impl Provider<ImageArtifact> for HuggingFace {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn attempt(&self, request: &ContentRequest) -> Result<ImageArtifact, ProviderError> {
        if self.api_token.is_empty() {
            return Err(ProviderError::MissingCredentials(
                "HUGGINGFACE_API_TOKEN is not set".to_string(),
            ));
        }

        let prompt = contextual_prompt(request);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(&InferenceRequest { inputs: &prompt })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        if bytes.is_empty() {
            return Err(ProviderError::ParseError(
                "Inference API returned an empty body".to_string(),
            ));
        }

        // The inference API returns raw JPEG bytes on success
        Ok(ImageArtifact::new(bytes.to_vec(), "jpeg"))
    }
}
