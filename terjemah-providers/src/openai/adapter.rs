//! OpenAI translation adapter.

use async_trait::async_trait;
use terjemah_core::{ProviderTier, TranslationRequest};
use terjemah_fetch::{ProviderError, TranslateContext, TranslationAdapter, require_credential};

use super::ID;
use super::api::OpenAiApiClient;

/// Translates with GPT-4 through the chat completions API.
#[derive(Debug, Clone, Default)]
pub struct OpenAiAdapter {
    client: OpenAiApiClient,
}

impl OpenAiAdapter {
    /// Creates an adapter for the public API.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an adapter for an OpenAI-compatible server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: OpenAiApiClient::with_base_url(base_url),
        }
    }
}

#[async_trait]
impl TranslationAdapter for OpenAiAdapter {
    fn id(&self) -> &str {
        ID
    }

    fn tier(&self) -> ProviderTier {
        ProviderTier::Llm
    }

    fn requires_credential(&self) -> bool {
        true
    }

    async fn translate(
        &self,
        ctx: &TranslateContext,
        request: &TranslationRequest,
        credential: Option<&str>,
    ) -> Result<String, ProviderError> {
        let api_key = require_credential(ID, credential)?;
        self.client.translate(&ctx.http, api_key, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terjemah_core::Language;

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        // Unroutable base URL: reaching the network would fail differently.
        let adapter = OpenAiAdapter::with_base_url("http://0.0.0.0:1");
        let request = TranslationRequest::new("halo", Language::Indonesian, Language::Japanese);

        let err = adapter
            .translate(&TranslateContext::new(), &request, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredential(id) if id == "gpt4"));
    }

    #[test]
    fn test_adapter_identity() {
        let adapter = OpenAiAdapter::new();
        assert_eq!(adapter.id(), "gpt4");
        assert_eq!(adapter.tier(), ProviderTier::Llm);
        assert!(adapter.requires_credential());
    }
}
