//! OpenAI provider descriptor.

use std::sync::Arc;
use terjemah_core::ProviderTier;
use terjemah_fetch::TranslationAdapter;

use super::ID;
use super::adapter::OpenAiAdapter;
use crate::descriptor::{CredentialConfig, DefaultSettings, ProviderDescriptor};

/// Environment variable holding the API key.
pub const ENV_VAR: &str = "OPENAI_API_KEY";

/// Returns the GPT-4 descriptor.
pub fn openai_descriptor() -> ProviderDescriptor {
    ProviderDescriptor {
        id: ID,
        display_name: "GPT-4 (OpenAI)",
        tier: ProviderTier::Llm,
        defaults: DefaultSettings {
            priority: 1,
            daily_quota: 100,
        },
        credential: CredentialConfig::required(ENV_VAR),
        dashboard_url: Some("https://platform.openai.com/api-keys"),
        build_adapter: build_openai_adapter,
    }
}

fn build_openai_adapter() -> Arc<dyn TranslationAdapter> {
    Arc::new(OpenAiAdapter::new())
}
