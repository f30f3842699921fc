//! Translate context providing access to host APIs.
//!
//! The context is handed to every adapter call. Today it carries the shared
//! HTTP client and the request settings.

use std::sync::Arc;
use std::time::Duration;

use crate::http::{DEFAULT_TIMEOUT_SECS, HttpClient};

// ============================================================================
// Translate Settings
// ============================================================================

/// Settings for outbound provider calls.
#[derive(Debug, Clone)]
pub struct TranslateSettings {
    /// Timeout for a single provider request.
    pub timeout: Duration,
    /// Whether proxy environment variables are honoured.
    pub use_system_proxy: bool,
}

impl Default for TranslateSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            use_system_proxy: true,
        }
    }
}

impl TranslateSettings {
    /// Returns settings with a custom timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ============================================================================
// Translate Context
// ============================================================================

/// Context provided to translation adapters.
#[derive(Clone)]
pub struct TranslateContext {
    /// HTTP client with tracing.
    pub http: Arc<HttpClient>,
    /// Request settings.
    pub settings: TranslateSettings,
}

impl TranslateContext {
    /// Creates a context with default settings.
    pub fn new() -> Self {
        Self::with_settings(TranslateSettings::default())
    }

    /// Creates a context with custom settings.
    pub fn with_settings(settings: TranslateSettings) -> Self {
        Self {
            http: Arc::new(client_for(&settings)),
            settings,
        }
    }

    /// Creates a builder for customizing the context.
    pub fn builder() -> TranslateContextBuilder {
        TranslateContextBuilder::new()
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.settings.timeout
    }
}

impl Default for TranslateContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TranslateContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslateContext")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Translate Context Builder
// ============================================================================

/// Builder for constructing a [`TranslateContext`].
#[derive(Default)]
pub struct TranslateContextBuilder {
    http: Option<Arc<HttpClient>>,
    settings: TranslateSettings,
}

impl TranslateContextBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP client. Its own timeout wins over [`Self::timeout`].
    pub fn http(mut self, http: Arc<HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    /// Connects directly, ignoring proxy environment variables.
    pub fn no_proxy(mut self) -> Self {
        self.settings.use_system_proxy = false;
        self
    }

    /// Builds the context.
    pub fn build(self) -> TranslateContext {
        let settings = self.settings;
        let http = self.http.unwrap_or_else(|| Arc::new(client_for(&settings)));
        TranslateContext { http, settings }
    }
}

fn client_for(settings: &TranslateSettings) -> HttpClient {
    HttpClient::with_options(settings.timeout, settings.use_system_proxy)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_builder() {
        let ctx = TranslateContext::builder()
            .timeout(Duration::from_secs(60))
            .build();

        assert_eq!(ctx.timeout(), Duration::from_secs(60));
        assert_eq!(ctx.http.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_default_context() {
        let ctx = TranslateContext::new();
        assert_eq!(ctx.settings.timeout, Duration::from_secs(30));
        assert!(ctx.settings.use_system_proxy);
    }

    #[test]
    fn test_builder_no_proxy() {
        let ctx = TranslateContext::builder().no_proxy().build();
        assert!(!ctx.settings.use_system_proxy);
    }

    #[test]
    fn test_builder_keeps_supplied_client() {
        let http = Arc::new(HttpClient::with_timeout(Duration::from_secs(3)));
        let ctx = TranslateContext::builder().http(Arc::clone(&http)).build();
        assert!(Arc::ptr_eq(&ctx.http, &http));
    }
}
