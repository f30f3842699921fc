//! Fetch error types.

use terjemah_store::StoreError;
use thiserror::Error;

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error (connect, TLS, timeout, body read).
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Status code.
        status: u16,
        /// Start of the response body.
        body: String,
    },
}

// ============================================================================
// Provider Error
// ============================================================================

/// Failure of a single provider adapter.
///
/// The dispatcher absorbs these and moves on to the next candidate.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider needs a credential and none is configured.
    #[error("{0}: API key not configured")]
    MissingCredential(String),

    /// Transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// Response did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Response body was not valid JSON for the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Http(HttpError::Request(err))
    }
}

// ============================================================================
// Dispatch Error
// ============================================================================

/// Errors surfaced by the translation dispatcher.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No enabled provider has quota left; no adapter was called.
    #[error("No available translation providers")]
    NoProviderAvailable,

    /// Every candidate provider failed.
    #[error("All translation providers failed ({attempts} tried)")]
    AllProvidersFailed {
        /// Number of providers attempted.
        attempts: usize,
    },

    /// Provider id is not registered.
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    /// The dispatcher was assembled inconsistently.
    #[error("Invalid dispatcher configuration: {0}")]
    Config(String),

    /// Settings could not be persisted.
    #[error("Settings error: {0}")]
    Store(#[from] StoreError),
}
