//! Provider descriptor system.
//!
//! A descriptor contains all the static configuration for a provider:
//! - Identity (id, display name, tier)
//! - Default priority and daily quota
//! - Credential requirements
//! - How to build its adapter

use std::sync::Arc;
use terjemah_core::{ProviderConfig, ProviderTier};
use terjemah_fetch::TranslationAdapter;

// ============================================================================
// Provider Descriptor
// ============================================================================

/// Complete descriptor for a provider.
pub struct ProviderDescriptor {
    /// Provider id (e.g. `"gpt4"`).
    pub id: &'static str,
    /// Display name.
    pub display_name: &'static str,
    /// Quality tier.
    pub tier: ProviderTier,
    /// Settings a fresh install starts with.
    pub defaults: DefaultSettings,
    /// Credential requirements.
    pub credential: CredentialConfig,
    /// Where to obtain an API key, if one is needed.
    pub dashboard_url: Option<&'static str>,
    /// Builds the adapter against the public service.
    pub build_adapter: fn() -> Arc<dyn TranslationAdapter>,
}

impl ProviderDescriptor {
    /// Returns the display name.
    pub fn display_name(&self) -> &str {
        self.display_name
    }

    /// Builds a fresh adapter.
    pub fn adapter(&self) -> Arc<dyn TranslationAdapter> {
        (self.build_adapter)()
    }

    /// Default configuration: enabled, no usage, no credential.
    pub fn default_config(&self) -> ProviderConfig {
        ProviderConfig::new(
            self.id,
            self.display_name,
            self.defaults.priority,
            self.defaults.daily_quota,
        )
    }

    /// Returns true if the provider cannot work without an API key.
    pub fn requires_credential(&self) -> bool {
        self.credential.required
    }

    /// Reads the credential from the provider's environment variable.
    ///
    /// Blank values count as unset.
    pub fn env_credential(&self) -> Option<String> {
        let var = self.credential.env_var?;
        std::env::var(var)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

impl std::fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("id", &self.id)
            .field("tier", &self.tier)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Default Settings
// ============================================================================

/// Initial priority and quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultSettings {
    /// Priority rank; lower is tried first.
    pub priority: u32,
    /// Successful calls allowed per day.
    pub daily_quota: u32,
}

// ============================================================================
// Credential Config
// ============================================================================

/// How a provider authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CredentialConfig {
    /// Whether calls fail without a key.
    pub required: bool,
    /// Environment variable consulted when no key is stored.
    pub env_var: Option<&'static str>,
}

impl CredentialConfig {
    /// No credential at all.
    pub const fn none() -> Self {
        Self {
            required: false,
            env_var: None,
        }
    }

    /// Key required, read from `env_var` as a fallback.
    pub const fn required(env_var: &'static str) -> Self {
        Self {
            required: true,
            env_var: Some(env_var),
        }
    }

    /// Key optional, read from `env_var` as a fallback.
    pub const fn optional(env_var: &'static str) -> Self {
        Self {
            required: false,
            env_var: Some(env_var),
        }
    }
}
