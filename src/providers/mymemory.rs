use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::content::{ContentRequest, TranslationArtifact};
use crate::errors::ProviderError;
use crate::providers::{transport_error, Provider};

/// MyMemory translation endpoint
const DEFAULT_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

/// MyMemory free-translation client.
///
/// Keyless REST API. Returns target-script text only; phonetic variants stay
/// unset and are filled in by other providers when available.
#[derive(Debug)]
pub struct MyMemory {
    /// HTTP client for API requests
    client: Client,
    /// Translation endpoint URL
    endpoint: String,
    /// Source language code (ISO 639-1)
    source_language: String,
    /// Target language code (ISO 639-1)
    target_language: String,
}

/// Translation response envelope
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    /// Payload with the translated text
    #[serde(rename = "responseData")]
    response_data: ResponseData,
    /// API-level status code (the HTTP status is 200 even for failures)
    #[serde(rename = "responseStatus")]
    response_status: serde_json::Value,
}

/// Inner payload
#[derive(Debug, Deserialize)]
struct ResponseData {
    /// The translated text
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl MyMemory {
    /// Create a new MyMemory client for a language pair
    pub fn new(
        endpoint: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
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
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }
}

#[async_trait]
impl Provider<TranslationArtifact> for MyMemory {
    fn name(&self) -> &str {
        "mymemory"
    }

    async fn attempt(&self, request: &ContentRequest) -> Result<TranslationArtifact, ProviderError> {
        let langpair = format!("{}|{}", self.source_language, self.target_language);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", request.text.as_str()), ("langpair", &langpair)])
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

        let envelope: TranslateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        // responseStatus is a number on success and a quoted string on some
        // failure paths, so compare loosely
        let api_status = envelope
            .response_status
            .as_u64()
            .or_else(|| envelope.response_status.as_str().and_then(|s| s.parse().ok()))
            .unwrap_or(0);

        if api_status != 200 {
            return Err(ProviderError::ApiError {
                status_code: api_status as u16,
                message: format!("MyMemory rejected '{}'", request.text),
            });
        }

        let text = envelope.response_data.translated_text.trim().to_string();
        if text.is_empty() {
            return Err(ProviderError::ParseError(
                "MyMemory returned an empty translation".to_string(),
            ));
        }

        Ok(TranslationArtifact::plain(text))
    }
}
