/*!
 * # Lexicard - vocabulary flashcards with generated media
 *
 * A Rust library for building language-learning flashcards: each card pairs
 * a source word with a translation and a picture, both produced by chains of
 * network providers that fall back to a local result when everything fails.
 *
 * ## Features
 *
 * - Translate words through multiple providers:
 *   - MyMemory (free translation API)
 *   - Any OpenAI-compatible chat endpoint
 * - Illustrate words through multiple providers:
 *   - HuggingFace hosted diffusion models
 *   - Pixabay photo search
 *   - Unsplash featured photos
 * - Ordered fallback with per-provider diagnostics; a local placeholder
 *   image and echo translation guarantee every card gets content
 * - SQLite-backed deck with duplicate detection
 * - Rolling-window rate limiting of card creation
 * - Small JSON HTTP API over the deck
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `content`: Request and artifact types shared across providers
 * - `providers`: Client implementations for the network providers:
 *   - `providers::huggingface`: HuggingFace inference client
 *   - `providers::pixabay`: Pixabay search client
 *   - `providers::unsplash`: Unsplash featured-photo client
 *   - `providers::mymemory`: MyMemory translation client
 *   - `providers::llm`: OpenAI-compatible chat client
 * - `resolver`: Fallback chain, local fallbacks and rate limiting
 * - `database`: SQLite persistence for the deck
 * - `vocabulary`: Seed vocabulary and request enrichment
 * - `prompt`: Image prompt templating
 * - `app_controller`: Main application controller
 * - `server`: HTTP API surface
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod content;
pub mod database;
pub mod errors;
pub mod prompt;
pub mod providers;
pub mod resolver;
pub mod server;
pub mod vocabulary;

// Re-export main types for easier usage
pub use app_config::{Config, Credentials, DuplicatePolicy};
pub use app_controller::{CardOutcome, Controller};
pub use content::{ContentRequest, ImageArtifact, TranslationArtifact};
pub use database::{FlashcardRecord, Repository};
pub use errors::{AppError, ProviderError, StorageError};
pub use resolver::{FallbackChain, Resolution, LOCAL_PROVIDER};
