use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::content::{ContentRequest, ImageArtifact};
use crate::errors::ProviderError;
use crate::providers::{transport_error, Provider};

/// Pixabay search endpoint
const DEFAULT_ENDPOINT: &str = "https://pixabay.com/api/";

/// Pixabay stock-photo client.
///
/// Performs a keyword search and then fetches the web-format rendition of the
/// first hit. Two network calls, but still one provider attempt from the
/// resolver's point of view.
#[derive(Debug)]
pub struct Pixabay {
    /// HTTP client for API requests
    client: Client,
    /// API key; empty means the provider is degraded to always-fails
    api_key: String,
    /// Search endpoint URL
    endpoint: String,
}

/// Search response envelope
#[derive(Debug, Deserialize)]
struct SearchResponse {
    /// Matching photos
    #[serde(default)]
    hits: Vec<SearchHit>,
}

/// One search hit
#[derive(Debug, Deserialize)]
struct SearchHit {
    /// URL of the web-sized rendition
    #[serde(rename = "webformatURL")]
    webformat_url: String,
}

impl Pixabay {
    /// Create a new Pixabay client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: if endpoint.is_empty() {
                DEFAULT_ENDPOINT.to_string()
            } else {
                endpoint
            },
        }
    }
}

#[async_trait]
impl Provider<ImageArtifact> for Pixabay {
    fn name(&self) -> &str {
        "pixabay"
    }

    async fn attempt(&self, request: &ContentRequest) -> Result<ImageArtifact, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::MissingCredentials(
                "PIXABAY_API_KEY is not set".to_string(),
            ));
        }

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", &request.photo_query()),
                ("image_type", "photo"),
                ("per_page", "3"),
            ])
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

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let hit = search.hits.first().ok_or_else(|| {
            ProviderError::RequestFailed(format!("No Pixabay hits for '{}'", request.text))
        })?;

        let image_response = self
            .client
            .get(&hit.webformat_url)
            .send()
            .await
            .map_err(transport_error)?;

        let image_status = image_response.status();
        if !image_status.is_success() {
            return Err(ProviderError::ApiError {
                status_code: image_status.as_u16(),
                message: format!("Image fetch failed for {}", hit.webformat_url),
            });
        }

        let bytes = image_response
            .bytes()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(ImageArtifact::new(bytes.to_vec(), "jpeg"))
    }
}
