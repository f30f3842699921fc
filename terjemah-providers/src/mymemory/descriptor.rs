//! MyMemory provider descriptor.

use std::sync::Arc;
use terjemah_core::ProviderTier;
use terjemah_fetch::TranslationAdapter;

use super::ID;
use super::adapter::MyMemoryAdapter;
use crate::descriptor::{CredentialConfig, DefaultSettings, ProviderDescriptor};

/// Returns the MyMemory descriptor.
pub fn mymemory_descriptor() -> ProviderDescriptor {
    ProviderDescriptor {
        id: ID,
        display_name: "MyMemory",
        tier: ProviderTier::Public,
        defaults: DefaultSettings {
            priority: 4,
            daily_quota: 1000,
        },
        credential: CredentialConfig::none(),
        dashboard_url: None,
        build_adapter: || Arc::new(MyMemoryAdapter::new()) as Arc<dyn TranslationAdapter>,
    }
}
