//! OpenAI chat completions client.

use serde::{Deserialize, Serialize};
use terjemah_core::{Language, TranslationRequest};
use terjemah_fetch::{HttpClient, ProviderError, http::parse_url};
use tracing::{debug, instrument};

// ============================================================================
// Constants
// ============================================================================

/// OpenAI API base URL.
pub const OPENAI_API_BASE: &str = "https://api.openai.com";

/// Chat completions endpoint.
const CHAT_ENDPOINT: &str = "/v1/chat/completions";

/// Model used for translation.
const MODEL: &str = "gpt-4";

/// Low temperature keeps translations literal.
const TEMPERATURE: f32 = 0.1;

/// System message instructing the model to translate only.
pub fn system_prompt(source: Language, target: Language) -> String {
    format!(
        "You are a professional translator. Translate from {source} to {target}. \
         Only return the translation, no explanations."
    )
}

// ============================================================================
// API Request Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

impl<'a> ChatRequest<'a> {
    fn for_translation(request: &'a TranslationRequest) -> Self {
        Self {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt(request.source, request.target),
                },
                ChatMessage {
                    role: "user",
                    content: request.text.clone(),
                },
            ],
            temperature: TEMPERATURE,
        }
    }
}

// ============================================================================
// API Response Types
// ============================================================================

/// Response from the chat completions API.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    /// Completion choices.
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// One completion choice.
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    /// The generated message.
    pub message: ChatChoiceMessage,
}

/// Message inside a choice.
#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    /// Message text.
    #[serde(default)]
    pub content: Option<String>,
}

/// Extracts the first completion's text, trimmed.
///
/// # Errors
///
/// Returns error if the body is not a chat completion or has no text.
pub fn parse_chat_response(body: &str) -> Result<String, ProviderError> {
    let response: ChatResponse = serde_json::from_str(body)?;
    let text = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(ProviderError::InvalidResponse(
            "completion has no message content".to_string(),
        ));
    }
    Ok(text)
}

// ============================================================================
// API Client
// ============================================================================

/// OpenAI API client.
#[derive(Debug, Clone)]
pub struct OpenAiApiClient {
    base_url: String,
}

impl OpenAiApiClient {
    /// Creates a client for the public API.
    pub fn new() -> Self {
        Self::with_base_url(OPENAI_API_BASE)
    }

    /// Creates a client for an OpenAI-compatible server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
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
        debug!("Requesting chat completion");

        let url = parse_url(&format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            CHAT_ENDPOINT
        ))?;
        let body = ChatRequest::for_translation(request);
        let response = http.post_json(&url, &body, Some(api_key)).await?;
        parse_chat_response(&response)
    }
}

impl Default for OpenAiApiClient {
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
    fn test_system_prompt_uses_language_names() {
        let prompt = system_prompt(Language::Japanese, Language::Indonesian);
        assert_eq!(
            prompt,
            "You are a professional translator. Translate from Japanese to Indonesian. \
             Only return the translation, no explanations."
        );
    }

    #[test]
    fn test_request_body() {
        let request = TranslationRequest::new("selamat pagi", Language::Indonesian, Language::Japanese);
        let body = serde_json::to_value(ChatRequest::for_translation(&request)).unwrap();

        assert_eq!(body["model"], "gpt-4");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "selamat pagi");
        assert!((body["temperature"].as_f64().unwrap() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_parse_response_trims() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  おはようございます\n"}}]}"#;
        assert_eq!(parse_chat_response(body).unwrap(), "おはようございます");
    }

    #[test]
    fn test_parse_response_takes_first_choice() {
        let body = r#"{"choices":[{"message":{"content":"一"}},{"message":{"content":"二"}}]}"#;
        assert_eq!(parse_chat_response(body).unwrap(), "一");
    }

    #[test]
    fn test_parse_response_without_choices() {
        assert!(matches!(
            parse_chat_response(r#"{"choices":[]}"#),
            Err(ProviderError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_chat_response(r#"{"error":{"message":"bad key"}}"#),
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_parse_response_not_json() {
        assert!(matches!(parse_chat_response("<html>"), Err(ProviderError::Json(_))));
    }

    #[test]
    fn test_base_url_override() {
        let client = OpenAiApiClient::with_base_url("http://127.0.0.1:8080/");
        assert_eq!(client.base_url(), "http://127.0.0.1:8080/");
        assert_eq!(OpenAiApiClient::new().base_url(), OPENAI_API_BASE);
    }
}
