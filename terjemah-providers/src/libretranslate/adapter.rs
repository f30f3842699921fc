//! LibreTranslate adapter.

use async_trait::async_trait;
use terjemah_core::{ProviderTier, TranslationRequest};
use terjemah_fetch::{ProviderError, TranslateContext, TranslationAdapter};

use super::ID;
use super::api::LibreTranslateApiClient;

/// Translates with a LibreTranslate instance.
#[derive(Debug, Clone, Default)]
pub struct LibreTranslateAdapter {
    client: LibreTranslateApiClient,
}

impl LibreTranslateAdapter {
    /// Creates an adapter for the default public instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an adapter for a self-hosted instance.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: LibreTranslateApiClient::with_base_url(base_url),
        }
    }
}

#[async_trait]
impl TranslationAdapter for LibreTranslateAdapter {
    fn id(&self) -> &str {
        ID
    }

    fn tier(&self) -> ProviderTier {
        ProviderTier::OpenService
    }

    async fn translate(
        &self,
        ctx: &TranslateContext,
        request: &TranslationRequest,
        credential: Option<&str>,
    ) -> Result<String, ProviderError> {
        let api_key = credential.map(str::trim).filter(|key| !key.is_empty());
        self.client.translate(&ctx.http, api_key, request).await
    }
}
