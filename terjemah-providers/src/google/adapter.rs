//! Google translation adapter.

use async_trait::async_trait;
use terjemah_core::{ProviderTier, TranslationRequest};
use terjemah_fetch::{ProviderError, TranslateContext, TranslationAdapter, require_credential};

use super::ID;
use super::api::GoogleApiClient;

/// Translates with Google Cloud Translation.
#[derive(Debug, Clone, Default)]
pub struct GoogleAdapter {
    client: GoogleApiClient,
}

impl GoogleAdapter {
    /// Creates an adapter for the public API.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an adapter for another host.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: GoogleApiClient::with_base_url(base_url),
        }
    }
}

#[async_trait]
impl TranslationAdapter for GoogleAdapter {
    fn id(&self) -> &str {
        ID
    }

    fn tier(&self) -> ProviderTier {
        ProviderTier::Commercial
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
