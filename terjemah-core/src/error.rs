//! Core error types for Terjemah.

use thiserror::Error;

/// Core error type for Terjemah operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Provider id is not registered.
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    /// Language is not Indonesian or Japanese.
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}
