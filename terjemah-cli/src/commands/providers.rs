//! Providers command - show provider status and daily usage.

use anyhow::Result;
use terjemah_core::ProviderTable;
use terjemah_fetch::duration_until_next_midnight;
use terjemah_providers::ProviderRegistry;
use tracing::info;

use super::{open_dispatcher, provider_rows};
use crate::output::{CredentialState, JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the providers command.
pub async fn run(cli: &Cli) -> Result<()> {
    info!("Listing providers");

    let dispatcher = open_dispatcher(cli).await?;
    let rows = provider_rows(&dispatcher).await;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);

            println!("{}", formatter.format_providers_header());
            println!("{}", "─".repeat(80));

            for row in &rows {
                println!("{}", formatter.format_provider_line(row));
            }

            let hints: Vec<String> = rows
                .iter()
                .filter(|row| row.credential == CredentialState::Missing)
                .filter_map(|row| ProviderRegistry::get(&row.config.id))
                .map(|desc| {
                    formatter.format_key_hint(desc.id, desc.credential.env_var, desc.dashboard_url)
                })
                .collect();
            if !hints.is_empty() {
                println!();
                for hint in &hints {
                    println!("{hint}");
                }
            }

            let table = ProviderTable::new(rows.iter().map(|row| row.config.clone()));
            let candidates = table.candidates(dispatcher.fallback_order());

            println!();
            println!("{}", formatter.format_dispatch_order(&candidates));
            println!(
                "{}",
                formatter.format_reset_countdown(duration_until_next_midnight(&chrono::Local::now()))
            );
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_providers(&rows));
        }
    }

    Ok(())
}
