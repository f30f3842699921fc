//! Provider registry for managing all provider descriptors.
//!
//! The registry provides static access to all provider configurations
//! and is the central point for assembling a dispatcher.

use std::sync::OnceLock;
use terjemah_core::ProviderConfig;
use terjemah_fetch::DispatcherBuilder;

use crate::descriptor::ProviderDescriptor;
use crate::google::google_descriptor;
use crate::libretranslate::libretranslate_descriptor;
use crate::mymemory::mymemory_descriptor;
use crate::openai::openai_descriptor;

// ============================================================================
// Static Registry
// ============================================================================

/// Static storage for all provider descriptors.
static DESCRIPTORS: OnceLock<Vec<ProviderDescriptor>> = OnceLock::new();

/// Initializes all provider descriptors.
///
/// Registration order is the fallback order: best quality first, free
/// public memory last.
fn init_descriptors() -> Vec<ProviderDescriptor> {
    vec![
        openai_descriptor(),
        google_descriptor(),
        libretranslate_descriptor(),
        mymemory_descriptor(),
    ]
}

// ============================================================================
// Provider Registry
// ============================================================================

/// Global registry of all provider descriptors.
pub struct ProviderRegistry;

impl ProviderRegistry {
    /// Returns all provider descriptors in fallback order.
    pub fn all() -> &'static [ProviderDescriptor] {
        DESCRIPTORS.get_or_init(init_descriptors)
    }

    /// Gets a provider descriptor by id.
    pub fn get(id: &str) -> Option<&'static ProviderDescriptor> {
        Self::all().iter().find(|d| d.id == id)
    }

    /// Returns the number of registered providers.
    pub fn count() -> usize {
        Self::all().len()
    }

    /// Returns all provider ids in fallback order.
    pub fn ids() -> Vec<&'static str> {
        Self::all().iter().map(|d| d.id).collect()
    }

    /// Default configuration of every provider.
    pub fn default_configs() -> Vec<ProviderConfig> {
        Self::all().iter().map(ProviderDescriptor::default_config).collect()
    }

    /// Credentials found in provider environment variables.
    pub fn env_credentials() -> Vec<(&'static str, String)> {
        Self::all()
            .iter()
            .filter_map(|d| d.env_credential().map(|key| (d.id, key)))
            .collect()
    }

    /// A dispatcher builder with every provider, its public-service adapter
    /// and the standard fallback order.
    pub fn dispatcher_builder() -> DispatcherBuilder {
        Self::all()
            .iter()
            .fold(DispatcherBuilder::new(), |builder, desc| {
                builder.provider(desc.default_config(), desc.adapter())
            })
            .fallback_order(Self::ids())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use terjemah_core::ProviderTier;

    #[test]
    fn test_registry_all_providers() {
        assert_eq!(ProviderRegistry::count(), 4);
        assert_eq!(
            ProviderRegistry::ids(),
            vec!["gpt4", "google", "libretranslate", "mymemory"]
        );
    }

    #[test]
    fn test_registry_get() {
        let desc = ProviderRegistry::get("google").unwrap();
        assert_eq!(desc.display_name(), "Google Translate");
        assert_eq!(desc.tier, ProviderTier::Commercial);
        assert!(ProviderRegistry::get("deepl").is_none());
    }

    #[test]
    fn test_default_configs() {
        let configs = ProviderRegistry::default_configs();
        let summary: Vec<(&str, &str, u32, u32)> = configs
            .iter()
            .map(|c| (c.id.as_str(), c.name.as_str(), c.priority, c.daily_quota))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("gpt4", "GPT-4 (OpenAI)", 1, 100),
                ("google", "Google Translate", 2, 500),
                ("libretranslate", "LibreTranslate", 3, 1000),
                ("mymemory", "MyMemory", 4, 1000),
            ]
        );
        assert!(configs.iter().all(|c| c.enabled && c.used_today == 0 && c.api_key.is_none()));
    }

    #[test]
    fn test_adapters_match_descriptors() {
        for desc in ProviderRegistry::all() {
            let adapter = desc.adapter();
            assert_eq!(adapter.id(), desc.id);
            assert_eq!(adapter.tier(), desc.tier);
            assert_eq!(adapter.requires_credential(), desc.requires_credential());
        }
    }

    #[test]
    fn test_confidence_by_tier() {
        let confidence: Vec<f64> = ProviderRegistry::all()
            .iter()
            .map(|d| d.tier.confidence())
            .collect();
        assert_eq!(confidence, vec![0.95, 0.90, 0.80, 0.80]);
    }

    #[tokio::test]
    async fn test_dispatcher_builder() {
        let dispatcher = ProviderRegistry::dispatcher_builder().build().await.unwrap();
        assert_eq!(dispatcher.fallback_order(), ["gpt4", "google", "libretranslate", "mymemory"]);
        assert_eq!(dispatcher.providers().await.len(), 4);
    }
}
