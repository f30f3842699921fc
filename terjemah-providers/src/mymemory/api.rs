//! MyMemory client.

use serde::Deserialize;
use serde_json::Value;
use terjemah_core::TranslationRequest;
use terjemah_fetch::{HttpClient, ProviderError, http::parse_url};
use tracing::{debug, instrument};
use url::Url;

/// MyMemory API base URL.
pub const MYMEMORY_API_BASE: &str = "https://api.mymemory.translated.net";

const GET_ENDPOINT: &str = "/get";

// ============================================================================
// API Response Types
// ============================================================================

/// Response from `/get`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyMemoryResponse {
    /// Best match.
    #[serde(default)]
    pub response_data: Option<ResponseData>,
    /// Status code; a number or a numeric string depending on the path.
    #[serde(default)]
    pub response_status: Option<Value>,
    /// Human-readable status detail.
    #[serde(default)]
    pub response_details: Option<String>,
}

/// `responseData` object.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseData {
    /// Translated text.
    #[serde(default)]
    pub translated_text: Option<String>,
}

impl MyMemoryResponse {
    /// Status code carried in the body, if any.
    pub fn status(&self) -> Option<u64> {
        match self.response_status.as_ref()? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Extracts `responseData.translatedText`.
///
/// MyMemory reports quota and validation failures with HTTP 200 and a
/// non-200 `responseStatus`; those are treated as errors.
///
/// # Errors
///
/// Returns error if the body reports a failure or has no text.
pub fn parse_get_response(body: &str) -> Result<String, ProviderError> {
    let response: MyMemoryResponse = serde_json::from_str(body)?;

    if let Some(status) = response.status().filter(|s| *s != 200) {
        let detail = response.response_details.unwrap_or_default();
        return Err(ProviderError::InvalidResponse(format!(
            "status {status}: {detail}"
        )));
    }

    response
        .response_data
        .and_then(|data| data.translated_text)
        .ok_or_else(|| {
            ProviderError::InvalidResponse("missing responseData.translatedText".to_string())
        })
}

// ============================================================================
// API Client
// ============================================================================

/// MyMemory API client.
#[derive(Debug, Clone)]
pub struct MyMemoryApiClient {
    base_url: String,
}

impl MyMemoryApiClient {
    /// Creates a client for the public API.
    pub fn new() -> Self {
        Self::with_base_url(MYMEMORY_API_BASE)
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

    fn endpoint(&self, request: &TranslationRequest) -> Result<Url, ProviderError> {
        let mut url = parse_url(&format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            GET_ENDPOINT
        ))?;
        let langpair = format!("{}|{}", request.source.code(), request.target.code());
        url.query_pairs_mut()
            .append_pair("q", &request.text)
            .append_pair("langpair", &langpair);
        Ok(url)
    }

    /// Requests a translation.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-success status or an
    /// unusable response.
    #[instrument(skip(self, http, request))]
    pub async fn translate(
        &self,
        http: &HttpClient,
        request: &TranslationRequest,
    ) -> Result<String, ProviderError> {
        debug!("Requesting MyMemory translation");

        let url = self.endpoint(request)?;
        let response = http.get_text(&url).await?;
        parse_get_response(&response)
    }
}

impl Default for MyMemoryApiClient {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
