//! Reset command - zero today's usage counters.

use anyhow::Result;
use serde_json::json;

use super::open_dispatcher;
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Runs the reset command.
pub async fn run(cli: &Cli) -> Result<()> {
    let dispatcher = open_dispatcher(cli).await?;
    dispatcher.reset_daily_usage().await?;
    let count = dispatcher.providers().await.len();

    match cli.format {
        OutputFormat::Text => {
            if !cli.quiet {
                println!("✓ Daily usage reset for {count} providers");
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&json!({ "reset": true, "providers": count })));
        }
    }

    Ok(())
}
