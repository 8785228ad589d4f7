use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::content::{ContentRequest, TranslationArtifact};
use crate::errors::ProviderError;
use crate::providers::{transport_error, Provider};

/// Default OpenAI-compatible endpoint
const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// System prompt asking the model for a strict JSON translation bundle
const SYSTEM_PROMPT: &str = "You are a translation engine. Translate the given English word or \
phrase to the requested target language. Respond with only a JSON object of the form \
{\"translation\": \"...\", \"kana\": \"...\", \"romaji\": \"...\"}. Use null for a phonetic \
field that does not apply to the target language.";

/// Chat-completion client for an OpenAI-compatible hosted language model,
/// used to translate with phonetic variants
#[derive(Debug)]
pub struct LlmTranslator {
    /// HTTP client for API requests
    client: Client,
    /// API key; empty means the provider is degraded to always-fails
    api_key: String,
    /// API endpoint base URL
    endpoint: String,
    /// Model identifier
    model: String,
    /// Target language name used inside the user prompt
    target_language: String,
}

/// Chat completion request
#[derive(Debug, Serialize)]
struct ChatRequest {
    /// The model to use
    model: String,
    /// The conversation messages
    messages: Vec<ChatMessage>,
    /// Sampling temperature
    temperature: f32,
}

/// One chat message
#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    /// Role of the sender (system, user, assistant)
    role: String,
    /// Message content
    content: String,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
struct ChatResponse {
    /// Completion choices
    choices: Vec<ChatChoice>,
}

/// One completion choice
#[derive(Debug, Deserialize)]
struct ChatChoice {
    /// The assistant message
    message: ChatMessage,
}

/// The JSON bundle the model is asked to emit
#[derive(Debug, Deserialize)]
struct TranslationBundle {
    /// Target-script translation
    translation: String,
    /// Kana reading
    #[serde(default)]
    kana: Option<String>,
    /// Romanized reading
    #[serde(default)]
    romaji: Option<String>,
}

impl LlmTranslator {
    /// Create a new LLM translation client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        target_language: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
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
            model: model.into(),
            target_language: target_language.into(),
        }
    }

    /// Extract the translation bundle from the assistant's reply, tolerating
    /// code fences around the JSON object
    fn parse_bundle(content: &str) -> Result<TranslationBundle, ProviderError> {
        let trimmed = content
            .trim()
            .trim_start_matches("```json")
            .trim_start_matches("```")
            .trim_end_matches("```")
            .trim();

        serde_json::from_str(trimmed)
            .map_err(|e| ProviderError::ParseError(format!("LLM reply was not valid JSON: {}", e)))
    }
}

#[async_trait]
impl Provider<TranslationArtifact> for LlmTranslator {
    fn name(&self) -> &str {
        "llm"
    }

    async fn attempt(&self, request: &ContentRequest) -> Result<TranslationArtifact, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::MissingCredentials(
                "LEXICARD_LLM_API_KEY is not set".to_string(),
            ));
        }

        let api_url = format!(
            "{}/chat/completions",
            self.endpoint.trim_end_matches('/')
        );

        let chat_request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!(
                        "Target language: {}. Word: {}",
                        self.target_language, request.text
                    ),
                },
            ],
            temperature: 0.2,
        };

        let response = self
            .client
            .post(&api_url)
            .bearer_auth(&self.api_key)
            .json(&chat_request)
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

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let content = chat_response
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| {
                ProviderError::ParseError("Chat response contained no choices".to_string())
            })?;

        let bundle = Self::parse_bundle(content)?;

        if bundle.translation.trim().is_empty() {
            return Err(ProviderError::ParseError(
                "LLM returned an empty translation".to_string(),
            ));
        }

        Ok(TranslationArtifact {
            text: bundle.translation,
            kana: bundle.kana.filter(|k| !k.trim().is_empty()),
            romaji: bundle.romaji.filter(|r| !r.trim().is_empty()),
        })
    }
}
