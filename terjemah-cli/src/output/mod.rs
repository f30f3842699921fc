//! Output formatting for CLI.

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use serde::Serialize;
use terjemah_core::{ProviderConfig, ProviderTier};


/// Where a provider's credential comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialState {
    /// Saved in the settings file.
    Stored,
    /// Read from the environment.
    Environment,
    /// Required but not configured.
    Missing,
    /// Not needed.
    NotRequired,
}

impl CredentialState {
    /// Short label for tables.
    pub fn label(self) -> &'static str {
        match self {
            Self::Stored => "stored",
            Self::Environment => "env",
            Self::Missing => "missing",
            Self::NotRequired => "-",
        }
    }
}

/// One provider as shown by `providers` and `config show`.
#[derive(Debug, Clone)]
pub struct ProviderRow {
    /// Current configuration and usage.
    pub config: ProviderConfig,
    /// Quality tier.
    pub tier: ProviderTier,
    /// Credential source.
    pub credential: CredentialState,
}
