use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::content::{ContentRequest, ImageArtifact};
use crate::errors::ProviderError;
use crate::providers::{transport_error, Provider};

/// Unsplash featured-photo base URL (keyless redirect service)
const DEFAULT_ENDPOINT: &str = "https://source.unsplash.com/featured/400x300";

/// Unsplash stock-photo client using the keyless featured-photo redirect
#[derive(Debug)]
pub struct Unsplash {
    /// HTTP client for API requests
    client: Client,
    /// Featured-photo base URL
    endpoint: String,
}

impl Unsplash {
    /// Create a new Unsplash client
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: if endpoint.is_empty() {
                DEFAULT_ENDPOINT.to_string()
            } else {
                endpoint
            },
        }
    }
}

#[async_trait]
impl Provider<ImageArtifact> for Unsplash {
    fn name(&self) -> &str {
        "unsplash"
    }

    async fn attempt(&self, request: &ContentRequest) -> Result<ImageArtifact, ProviderError> {
        let url = format!(
            "{}/?{}",
            self.endpoint.trim_end_matches('/'),
            request.photo_query()
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: format!("Unsplash fetch failed for '{}'", request.text),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        if bytes.is_empty() {
            return Err(ProviderError::ParseError(
                "Unsplash returned an empty body".to_string(),
            ));
        }

        Ok(ImageArtifact::new(bytes.to_vec(), "jpeg"))
    }
}
