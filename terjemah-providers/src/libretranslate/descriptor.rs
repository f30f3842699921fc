//! LibreTranslate provider descriptor.

use std::sync::Arc;
use terjemah_core::ProviderTier;
use terjemah_fetch::TranslationAdapter;

use super::ID;
use super::adapter::LibreTranslateAdapter;
use crate::descriptor::{CredentialConfig, DefaultSettings, ProviderDescriptor};

/// Returns the LibreTranslate descriptor.
pub fn libretranslate_descriptor() -> ProviderDescriptor {
    ProviderDescriptor {
        id: ID,
        display_name: "LibreTranslate",
        tier: ProviderTier::OpenService,
        defaults: DefaultSettings {
            priority: 3,
            daily_quota: 1000,
        },
        credential: CredentialConfig::optional("LIBRETRANSLATE_KEY"),
        dashboard_url: Some("https://portal.libretranslate.com"),
        build_adapter: || Arc::new(LibreTranslateAdapter::new()) as Arc<dyn TranslationAdapter>,
    }
}
