/*!
 * Error types for the lexicard application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when calling a content provider.
///
/// Every variant is caught at the provider-call boundary and converted into a
/// diagnostic string by the fallback resolver; none of them ever crosses the
/// boundary of a single user action.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Provider is unusable because its credential was not configured.
    /// Such a provider always fails instead of aborting the process.
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),
}

/// Errors that can occur while persisting or loading flashcards
#[derive(Error, Debug)]
pub enum StorageError {
    /// Error opening or querying the local database
    #[error("Database error: {0}")]
    Database(String),

    /// Error creating or writing under the local images directory
    #[error("Image store error: {0}")]
    ImageStore(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// User input failed validation; no provider call was attempted
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The rolling-window action limit was hit; no provider call was attempted
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// A card for this source word already exists (duplicate policy is reject)
    #[error("Duplicate card: {0}")]
    Duplicate(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from local persistence
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Storage(StorageError::ImageStore(error.to_string()))
    }
}
