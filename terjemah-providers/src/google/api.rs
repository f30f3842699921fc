//! Google Translate v2 client.

use serde::{Deserialize, Serialize};
use terjemah_core::TranslationRequest;
use terjemah_fetch::{HttpClient, ProviderError, http::parse_url};
use tracing::{debug, instrument};

/// Google Translation API base URL.
pub const GOOGLE_API_BASE: &str = "https://translation.googleapis.com";

/// Translate endpoint.
const TRANSLATE_ENDPOINT: &str = "/language/translate/v2";

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    q: &'a str,
    source: &'static str,
    target: &'static str,
}

/// Response from the translate endpoint.
#[derive(Debug, Deserialize)]
pub struct GoogleTranslateResponse {
    /// Payload; absent on error responses.
    #[serde(default)]
    pub data: Option<TranslationsData>,
}

/// `data` object of the response.
#[derive(Debug, Deserialize)]
pub struct TranslationsData {
    /// One entry per input string.
    #[serde(default)]
    pub translations: Vec<Translation>,
}

/// A single translation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    /// Translated text.
    pub translated_text: String,
}

/// Extracts `data.translations[0].translatedText`.
///
/// # Errors
///
/// Returns error if the body has no translation.
pub fn parse_translate_response(body: &str) -> Result<String, ProviderError> {
    let response: GoogleTranslateResponse = serde_json::from_str(body)?;
    response
        .data
        .and_then(|data| data.translations.into_iter().next())
        .map(|t| t.translated_text)
        .ok_or_else(|| ProviderError::InvalidResponse("no translations in response".to_string()))
}

// ============================================================================
// API Client
// ============================================================================

/// Google Translate API client.
#[derive(Debug, Clone)]
pub struct GoogleApiClient {
    base_url: String,
}

impl GoogleApiClient {
    /// Creates a client for the public API.
    pub fn new() -> Self {
        Self::with_base_url(GOOGLE_API_BASE)
    }

    /// Creates a client for another host.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, api_key: &str) -> Result<url::Url, ProviderError> {
        let mut url = parse_url(&format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            TRANSLATE_ENDPOINT
        ))?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }

    /// Requests a translation.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-success status or an
    /// unusable response.
    #[instrument(skip(self, http, api_key, request))]
    pub async fn translate(
        &self,
        http: &HttpClient,
        api_key: &str,
        request: &TranslationRequest,
    ) -> Result<String, ProviderError> {
        debug!("Requesting Google translation");

        let url = self.endpoint(api_key)?;
        let body = TranslateBody {
            q: &request.text,
            source: request.source.code(),
            target: request.target.code(),
        };
        let response = http.post_json(&url, &body, None).await?;
        parse_translate_response(&response)
    }
}

impl Default for GoogleApiClient {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
