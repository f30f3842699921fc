//! MyMemory adapter.

use async_trait::async_trait;
use terjemah_core::{ProviderTier, TranslationRequest};
use terjemah_fetch::{ProviderError, TranslateContext, TranslationAdapter};

use super::ID;
use super::api::MyMemoryApiClient;

/// Translates with the MyMemory public API.
#[derive(Debug, Clone, Default)]
pub struct MyMemoryAdapter {
    client: MyMemoryApiClient,
}

impl MyMemoryAdapter {
    /// Creates an adapter for the public API.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an adapter for another host.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: MyMemoryApiClient::with_base_url(base_url),
        }
    }
}

#[async_trait]
impl TranslationAdapter for MyMemoryAdapter {
    fn id(&self) -> &str {
        ID
    }

    fn tier(&self) -> ProviderTier {
        ProviderTier::Public
    }

    async fn translate(
        &self,
        ctx: &TranslateContext,
        request: &TranslationRequest,
        _credential: Option<&str>,
    ) -> Result<String, ProviderError> {
        self.client.translate(&ctx.http, request).await
    }
}
