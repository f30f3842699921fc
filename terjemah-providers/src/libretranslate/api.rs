//! LibreTranslate client.

use serde::{Deserialize, Serialize};
use terjemah_core::TranslationRequest;
use terjemah_fetch::{HttpClient, ProviderError, http::parse_url};
use tracing::{debug, instrument};

/// Default public instance.
pub const LIBRETRANSLATE_API_BASE: &str = "https://libretranslate.de";

const TRANSLATE_ENDPOINT: &str = "/translate";

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    q: &'a str,
    source: &'static str,
    target: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

/// Response from `/translate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibreTranslateResponse {
    /// Translated text.
    #[serde(default)]
    pub translated_text: Option<String>,
    /// Error message returned by the instance.
    #[serde(default)]
    pub error: Option<String>,
}

/// Extracts `translatedText`.
///
/// # Errors
///
/// Returns error if the instance reported an error or sent no text.
pub fn parse_translate_response(body: &str) -> Result<String, ProviderError> {
    let response: LibreTranslateResponse = serde_json::from_str(body)?;
    match (response.translated_text, response.error) {
        (Some(text), _) => Ok(text),
        (None, Some(error)) => Err(ProviderError::InvalidResponse(error)),
        (None, None) => Err(ProviderError::InvalidResponse(
            "missing translatedText".to_string(),
        )),
    }
}

// ============================================================================
// API Client
// ============================================================================

/// LibreTranslate API client.
#[derive(Debug, Clone)]
pub struct LibreTranslateApiClient {
    base_url: String,
}

impl LibreTranslateApiClient {
    /// Creates a client for the default public instance.
    pub fn new() -> Self {
        Self::with_base_url(LIBRETRANSLATE_API_BASE)
    }

    /// Creates a client for a self-hosted instance.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests a translation, sending `api_key` when present.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-success status or an
    /// unusable response.
    #[instrument(skip(self, http, api_key, request))]
    pub async fn translate(
        &self,
        http: &HttpClient,
        api_key: Option<&str>,
        request: &TranslationRequest,
    ) -> Result<String, ProviderError> {
        debug!(has_key = api_key.is_some(), "Requesting LibreTranslate translation");

        let url = parse_url(&format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            TRANSLATE_ENDPOINT
        ))?;
        let body = TranslateBody {
            q: &request.text,
            source: request.source.code(),
            target: request.target.code(),
            api_key,
        };
        let response = http.post_json(&url, &body, None).await?;
        parse_translate_response(&response)
    }
}

impl Default for LibreTranslateApiClient {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response() {
        assert_eq!(
            parse_translate_response(r#"{"translatedText":"おはよう"}"#).unwrap(),
            "おはよう"
        );
    }

    #[test]
    fn test_parse_reported_error() {
        let err = parse_translate_response(r#"{"error":"Invalid API key"}"#).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(msg) if msg == "Invalid API key"));
    }

    #[test]
    fn test_parse_missing_field() {
        assert!(parse_translate_response("{}").is_err());
    }

    #[test]
    fn test_body_key_optional() {
        let without = TranslateBody {
            q: "halo",
            source: "id",
            target: "ja",
            api_key: None,
        };
        let json = serde_json::to_value(&without).unwrap();
        assert!(json.get("api_key").is_none());

        let with = TranslateBody {
            api_key: Some("lt-key"),
            ..without
        };
        assert_eq!(serde_json::to_value(&with).unwrap()["api_key"], "lt-key");
    }
}
