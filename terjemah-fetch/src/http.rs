//! HTTP client with tracing and status handling.
//!
//! Every provider adapter talks to its service through this wrapper. It
//! turns non-success statuses into [`HttpError::Status`] and hands the body
//! back as text so adapters decide how to parse it.

use reqwest::{Client, RequestBuilder, header};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::HttpError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for Terjemah.
const USER_AGENT: &str = concat!("Terjemah/", env!("CARGO_PKG_VERSION"));

/// Bytes of an error body kept in [`HttpError::Status`].
const ERROR_BODY_LIMIT: usize = 200;

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper with tracing.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialised. See
    /// [`HttpClient::with_timeout`].
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built. That only happens when the
    /// system TLS configuration is unusable, in which case no provider can
    /// be reached at all.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_options(timeout, true)
    }

    /// Creates a client, optionally ignoring proxy environment variables.
    ///
    /// # Panics
    ///
    /// See [`HttpClient::with_timeout`].
    pub fn with_options(timeout: Duration, use_system_proxy: bool) -> Self {
        let mut builder = Client::builder().timeout(timeout).user_agent(USER_AGENT);
        if !use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().unwrap_or_else(|e| {
            panic!("Failed to create HTTP client: {e}. Check the system TLS configuration.")
        });

        Self {
            inner: client,
            timeout,
        }
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Performs a GET request and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-success status.
    #[instrument(skip(self), fields(url = %redact(url)))]
    pub async fn get_text(&self, url: &Url) -> Result<String, HttpError> {
        debug!("GET request");
        self.send(self.inner.get(url.clone())).await
    }

    /// POSTs `body` as JSON and returns the response body.
    ///
    /// When `bearer` is set it is sent as an `Authorization: Bearer` header.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-success status.
    #[instrument(skip(self, body, bearer), fields(url = %redact(url)))]
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &Url,
        body: &T,
        bearer: Option<&str>,
    ) -> Result<String, HttpError> {
        debug!("POST request");
        let mut request = self.inner.post(url.clone()).json(body);
        if let Some(token) = bearer {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(request).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<String, HttpError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = %status, "Response received");

        let body = response.text().await?;
        if !status.is_success() {
            return Err(HttpError::Status {
                status: status.as_u16(),
                body: truncate(&body, ERROR_BODY_LIMIT),
            });
        }
        Ok(body)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Parses a URL, mapping failures to [`HttpError::InvalidUrl`].
///
/// # Errors
///
/// Returns error if `raw` is not an absolute URL.
pub fn parse_url(raw: &str) -> Result<Url, HttpError> {
    Url::parse(raw).map_err(|e| HttpError::InvalidUrl(format!("{raw}: {e}")))
}

/// URL for logs with the query string removed, since it may hold a key.
fn redact(url: &Url) -> String {
    let mut clean = url.clone();
    clean.set_query(None);
    clean.to_string()
}

fn truncate(text: &str, limit: usize) -> String {
    let trimmed = text.trim();
    if trimmed.len() <= limit {
        return trimmed.to_string();
    }
    let mut end = limit;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &trimmed[..end])
}

// ============================================================================
// Tests
// ============================================================================
