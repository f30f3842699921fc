//! Google provider descriptor.

use std::sync::Arc;
use terjemah_core::ProviderTier;
use terjemah_fetch::TranslationAdapter;

use super::ID;
use super::adapter::GoogleAdapter;
use crate::descriptor::{CredentialConfig, DefaultSettings, ProviderDescriptor};

/// Returns the Google Translate descriptor.
pub fn google_descriptor() -> ProviderDescriptor {
    ProviderDescriptor {
        id: ID,
        display_name: "Google Translate",
        tier: ProviderTier::Commercial,
        defaults: DefaultSettings {
            priority: 2,
            daily_quota: 500,
        },
        credential: CredentialConfig::required("GOOGLE_TRANSLATE_KEY"),
        dashboard_url: Some("https://console.cloud.google.com/apis/credentials"),
        build_adapter: || Arc::new(GoogleAdapter::new()) as Arc<dyn TranslationAdapter>,
    }
}
