//! Domain models for Terjemah.
//!
//! ## Submodules
//!
//! - [`language`] - Supported languages and their provider codes
//! - [`provider`] - Provider configuration, tiers and the provider table
//! - [`translation`] - Translation requests and results

mod language;
mod provider;
mod translation;

pub use language::Language;
pub use provider::{ProviderConfig, ProviderTable, ProviderTier, ProviderUpdate, StoredProvider};
pub use translation::{TranslationRequest, TranslationResult};
