//! Config command - manage provider configuration.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use serde_json::json;
use terjemah_core::ProviderUpdate;
use terjemah_store::{default_config_dir, default_settings_path};
use tracing::info;

use super::{known_provider, open_dispatcher, provider_rows};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Enable a provider.
    Enable {
        /// Provider to enable.
        provider: String,
    },

    /// Disable a provider.
    Disable {
        /// Provider to disable.
        provider: String,
    },

    /// Set a provider's priority (lower is tried first).
    Priority {
        /// Provider to change.
        provider: String,
        /// New priority.
        value: u32,
    },

    /// Set a provider's daily request quota.
    Quota {
        /// Provider to change.
        provider: String,
        /// Successful requests allowed per day.
        value: u32,
    },

    /// Store an API key for a provider.
    Key {
        /// Provider to change.
        provider: String,
        /// The API key.
        value: String,
    },

    /// Remove a provider's stored API key.
    ClearKey {
        /// Provider to change.
        provider: String,
    },
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli).await,
        ConfigAction::Path => show_paths(cli),
        ConfigAction::Enable { provider } => {
            update(cli, provider, ProviderUpdate::enabled(true)).await
        }
        ConfigAction::Disable { provider } => {
            update(cli, provider, ProviderUpdate::enabled(false)).await
        }
        ConfigAction::Priority { provider, value } => {
            update(cli, provider, ProviderUpdate::priority(*value)).await
        }
        ConfigAction::Quota { provider, value } => {
            update(cli, provider, ProviderUpdate::daily_quota(*value)).await
        }
        ConfigAction::Key { provider, value } => {
            let value = value.trim();
            if value.is_empty() {
                bail!("API key is empty; use `config clear-key {provider}` to remove it");
            }
            update(cli, provider, ProviderUpdate::api_key(value)).await
        }
        ConfigAction::ClearKey { provider } => {
            update(cli, provider, ProviderUpdate::api_key("")).await
        }
    }
}

/// Applies one change to a provider and prints its new state.
async fn update(cli: &Cli, provider: &str, change: ProviderUpdate) -> Result<()> {
    let id = known_provider(provider)?;
    let dispatcher = open_dispatcher(cli).await?;
    let updated = dispatcher.update_provider(id, change).await?;
    info!(provider = id, "Provider updated");

    match cli.format {
        OutputFormat::Text => {
            if !cli.quiet {
                let formatter = TextFormatter::new(!cli.no_color);
                println!("{}", formatter.format_provider_update(&updated));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let rows: Vec<_> = provider_rows(&dispatcher)
                .await
                .into_iter()
                .filter(|row| row.config.id == id)
                .collect();
            println!("{}", formatter.format_providers(&rows));
        }
    }

    Ok(())
}

async fn show_config(cli: &Cli) -> Result<()> {
    let dispatcher = open_dispatcher(cli).await?;
    let rows = provider_rows(&dispatcher).await;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("Terjemah Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("Settings: {}", dispatcher.settings_location());
            println!("Fallback order: {}", dispatcher.fallback_order().join(", "));
            println!();
            println!("{}", formatter.format_providers_header());
            for row in &rows {
                println!("{}", formatter.format_provider_line(row));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let providers: serde_json::Value =
                serde_json::from_str(&formatter.format_providers(&rows))?;
            let output = json!({
                "settings": dispatcher.settings_location(),
                "fallbackOrder": dispatcher.fallback_order(),
                "providers": providers,
            });
            println!("{}", formatter.format(&output));
        }
    }

    Ok(())
}

fn show_paths(cli: &Cli) -> Result<()> {
    let settings = cli.settings.clone().unwrap_or_else(default_settings_path);

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config directory: {}", default_config_dir().display());
            println!("Settings file:    {}", settings.display());
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let output = json!({
                "config_dir": default_config_dir().display().to_string(),
                "settings_file": settings.display().to_string(),
            });
            println!("{}", formatter.format(&output));
        }
    }

    Ok(())
}
