//! CLI command implementations.

pub mod config;
pub mod providers;
pub mod reset;
pub mod session;
pub mod translate;

use std::sync::Arc;

use anyhow::{Context, Result};
use terjemah_fetch::{TranslateContext, TranslationDispatcher};
use terjemah_providers::ProviderRegistry;
use terjemah_store::{JsonFileStore, ProviderSettingsStore};
use tracing::debug;

use crate::Cli;
use crate::output::{CredentialState, ProviderRow};

/// Builds the dispatcher from the settings file and the environment.
pub async fn open_dispatcher(cli: &Cli) -> Result<TranslationDispatcher> {
    let backend = match &cli.settings {
        Some(path) => JsonFileStore::open(path).await,
        None => JsonFileStore::open_default().await,
    }
    .context("Failed to open settings")?;
    debug!(path = %backend.path().display(), "Using settings file");

    let mut builder = ProviderRegistry::dispatcher_builder()
        .store(ProviderSettingsStore::new(Arc::new(backend)))
        .context(TranslateContext::new());

    for (id, key) in ProviderRegistry::env_credentials() {
        debug!(provider = id, "Using credential from environment");
        builder = builder.credential_fallback(id, key);
    }

    Ok(builder.build().await?)
}

/// Collects the provider table with tier and credential source.
pub async fn provider_rows(dispatcher: &TranslationDispatcher) -> Vec<ProviderRow> {
    dispatcher
        .providers()
        .await
        .into_iter()
        .filter_map(|config| {
            let desc = ProviderRegistry::get(&config.id)?;
            let credential = if config.credential().is_some() {
                CredentialState::Stored
            } else if dispatcher.has_fallback_credential(&config.id) {
                CredentialState::Environment
            } else if desc.requires_credential() {
                CredentialState::Missing
            } else {
                CredentialState::NotRequired
            };
            Some(ProviderRow {
                config,
                tier: desc.tier,
                credential,
            })
        })
        .collect()
}

/// Resolves a provider id or fails with the list of known ids.
pub fn known_provider(id: &str) -> Result<&'static str> {
    ProviderRegistry::get(id)
        .map(|desc| desc.id)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown provider: {} (known: {})",
                id,
                ProviderRegistry::ids().join(", ")
            )
        })
}
