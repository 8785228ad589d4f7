use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings. Provider credentials are
/// deliberately not part of the file; they come from the process environment
/// so that a missing key degrades one provider instead of leaking into a
/// config file.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO 639-1)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO 639-1)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Image chain config
    #[serde(default)]
    pub image: ImageChainConfig,

    /// Translation chain config
    #[serde(default)]
    pub translation: TranslationChainConfig,

    /// Storage config
    #[serde(default)]
    pub storage: StorageConfig,

    /// Rate limit config
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// HTTP server config
    #[serde(default)]
    pub server: ServerConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            target_language: default_target_language(),
            image: ImageChainConfig::default(),
            translation: TranslationChainConfig::default(),
            storage: StorageConfig::default(),
            rate_limit: RateLimitConfig::default(),
            server: ServerConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())
            .with_context(|| format!("Failed to open config file: {:?}", path.as_ref()))?;
        let reader = std::io::BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Validate endpoint URLs and basic ranges
    pub fn validate(&self) -> Result<()> {
        for (name, endpoint) in [
            ("image.huggingface_endpoint", &self.image.huggingface_endpoint),
            ("image.pixabay_endpoint", &self.image.pixabay_endpoint),
            ("image.unsplash_endpoint", &self.image.unsplash_endpoint),
            ("translation.mymemory_endpoint", &self.translation.mymemory_endpoint),
            ("translation.llm_endpoint", &self.translation.llm_endpoint),
        ] {
            Url::parse(endpoint)
                .map_err(|e| anyhow!("Invalid URL for {}: {} ({})", name, endpoint, e))?;
        }

        if self.rate_limit.max_actions_per_minute == 0 {
            return Err(anyhow!("rate_limit.max_actions_per_minute must be at least 1"));
        }

        Ok(())
    }

    /// Human-readable name for the configured target language, used inside
    /// LLM prompts
    pub fn target_language_name(&self) -> &str {
        language_name(&self.target_language)
    }
}

/// Map an ISO 639-1 code to a display name, falling back to the code itself
pub fn language_name(code: &str) -> &str {
    match code {
        "ja" => "Japanese",
        "en" => "English",
        "fr" => "French",
        "es" => "Spanish",
        "de" => "German",
        "ko" => "Korean",
        "zh" => "Chinese",
        other => other,
    }
}

/// Image provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ImageProviderKind {
    // @provider: HuggingFace hosted diffusion model
    HuggingFace,
    // @provider: Pixabay stock-photo search
    Pixabay,
    // @provider: Unsplash featured-photo redirect
    Unsplash,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProviderKind {
    // @provider: MyMemory free translation API
    MyMemory,
    // @provider: OpenAI-compatible chat endpoint
    Llm,
}

/// Image chain configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ImageChainConfig {
    /// Provider priority order; the local placeholder is always the implicit
    /// final step and is not listed here
    #[serde(default = "default_image_order")]
    pub order: Vec<ImageProviderKind>,

    /// Full HuggingFace model inference URL
    #[serde(default = "default_huggingface_endpoint")]
    pub huggingface_endpoint: String,

    /// Pixabay search endpoint
    #[serde(default = "default_pixabay_endpoint")]
    pub pixabay_endpoint: String,

    /// Unsplash featured-photo base URL
    #[serde(default = "default_unsplash_endpoint")]
    pub unsplash_endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ImageChainConfig {
    fn default() -> Self {
        Self {
            order: default_image_order(),
            huggingface_endpoint: default_huggingface_endpoint(),
            pixabay_endpoint: default_pixabay_endpoint(),
            unsplash_endpoint: default_unsplash_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Translation chain configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationChainConfig {
    /// Provider priority order; the echo pseudo-translation is always the
    /// implicit final step
    #[serde(default = "default_translation_order")]
    pub order: Vec<TranslationProviderKind>,

    /// MyMemory endpoint
    #[serde(default = "default_mymemory_endpoint")]
    pub mymemory_endpoint: String,

    /// OpenAI-compatible endpoint base URL
    #[serde(default = "default_llm_endpoint")]
    pub llm_endpoint: String,

    /// Model used on the LLM endpoint
    #[serde(default = "default_llm_model")]
    pub llm_model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslationChainConfig {
    fn default() -> Self {
        Self {
            order: default_translation_order(),
            mymemory_endpoint: default_mymemory_endpoint(),
            llm_endpoint: default_llm_endpoint(),
            llm_model: default_llm_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Duplicate-card policy.
///
/// The source history is inconsistent about whether "at most one card per
/// source word" is an invariant, so it is an explicit choice here rather
/// than an inferred one. Matching is case-insensitive on the source text.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Reject a creation whose source word already has a card
    #[default]
    Reject,
    /// Allow any number of cards per source word
    Allow,
}

/// Storage configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    /// Database file path; the platform data directory is used when unset
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Directory where generated images are saved, created on demand
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,

    /// Duplicate-card policy
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            images_dir: default_images_dir(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

/// Rate limit configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RateLimitConfig {
    /// Card creations allowed per rolling 60-second window
    #[serde(default = "default_max_actions_per_minute")]
    pub max_actions_per_minute: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_actions_per_minute: default_max_actions_per_minute(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Bind address for `lexicard serve`
    #[serde(default = "default_bind_address")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind_address(),
        }
    }
}

/// Provider credentials, read from the process environment at startup.
///
/// A missing value never aborts the process; it degrades the corresponding
/// provider to "always fails with a missing-credentials diagnostic".
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// HuggingFace inference bearer token
    pub huggingface_token: String,
    /// Pixabay API key
    pub pixabay_key: String,
    /// API key for the OpenAI-compatible LLM endpoint
    pub llm_api_key: String,
}

impl Credentials {
    /// Read credentials from the environment
    pub fn from_env() -> Self {
        Self {
            huggingface_token: std::env::var("HUGGINGFACE_API_TOKEN").unwrap_or_default(),
            pixabay_key: std::env::var("PIXABAY_API_KEY").unwrap_or_default(),
            llm_api_key: std::env::var("LEXICARD_LLM_API_KEY").unwrap_or_default(),
        }
    }
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational output (default)
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "ja".to_string()
}

fn default_image_order() -> Vec<ImageProviderKind> {
    vec![
        ImageProviderKind::HuggingFace,
        ImageProviderKind::Pixabay,
        ImageProviderKind::Unsplash,
    ]
}

fn default_translation_order() -> Vec<TranslationProviderKind> {
    vec![
        TranslationProviderKind::MyMemory,
        TranslationProviderKind::Llm,
    ]
}

fn default_huggingface_endpoint() -> String {
    "https://api-inference.huggingface.co/models/runwayml/stable-diffusion-v1-5".to_string()
}

fn default_pixabay_endpoint() -> String {
    "https://pixabay.com/api/".to_string()
}

fn default_unsplash_endpoint() -> String {
    "https://source.unsplash.com/featured/400x300".to_string()
}

fn default_mymemory_endpoint() -> String {
    "https://api.mymemory.translated.net/get".to_string()
}

fn default_llm_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("images")
}

fn default_max_actions_per_minute() -> u32 {
    5
}

fn default_bind_address() -> String {
    "127.0.0.1:8000".to_string()
}
