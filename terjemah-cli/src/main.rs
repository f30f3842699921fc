// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Terjemah CLI - Indonesian/Japanese translation from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Indonesian to Japanese (default direction)
//! terjemah translate selamat pagi
//!
//! # Japanese to Indonesian
//! terjemah translate --from ja ありがとう
//!
//! # Show which providers were tried
//! terjemah --verbose translate halo
//!
//! # Provider status and daily usage
//! terjemah providers
//!
//! # Configure a provider
//! terjemah config key google AIza...
//! terjemah config disable gpt4
//!
//! # Translate stdin line by line with the daily reset running
//! terjemah session
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use terjemah_fetch::DispatchError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{config, providers, reset, session, translate};

// ============================================================================
// CLI Definition
// ============================================================================

/// Terjemah CLI - Indonesian/Japanese translation.
#[derive(Parser)]
#[command(name = "terjemah")]
#[command(about = "Indonesian/Japanese translation with provider fallback")]
#[command(long_about = r#"
Terjemah translates between Indonesian and Japanese, trying each configured
provider in priority order until one succeeds. Every provider has a daily
quota that resets at local midnight.

Providers:
  • GPT-4 (gpt4)                   OPENAI_API_KEY
  • Google Translate (google)      GOOGLE_TRANSLATE_KEY
  • LibreTranslate (libretranslate) LIBRETRANSLATE_KEY (optional)
  • MyMemory (mymemory)            no key needed

Examples:
  terjemah translate selamat pagi       # id → ja
  terjemah translate --from ja おはよう  # ja → id
  terjemah providers                    # Status and usage
  terjemah config priority mymemory 1   # Try MyMemory first
"#)]
#[command(version)]
#[command(author = "Terjemah Contributors")]
pub struct Cli {
    /// Subcommand to run. If none, shows provider status.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Settings file to use instead of the default location.
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Translate text.
    #[command(visible_alias = "t")]
    Translate(translate::TranslateArgs),

    /// Show providers with priority, quota and credential state.
    #[command(visible_alias = "p")]
    Providers,

    /// Manage provider configuration.
    Config(config::ConfigArgs),

    /// Reset today's usage counters now.
    Reset,

    /// Translate stdin line by line, resetting usage at midnight.
    #[command(visible_alias = "s")]
    Session(session::SessionArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Every provider is disabled or out of quota.
    NoProviderAvailable = 2,
    /// Every candidate provider failed.
    AllProvidersFailed = 3,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<DispatchError>() {
            Some(DispatchError::NoProviderAvailable) => Self::NoProviderAvailable,
            Some(DispatchError::AllProvidersFailed { .. }) => Self::AllProvidersFailed,
            _ => Self::Error,
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("terjemah=debug,info")
    } else {
        EnvFilter::new("terjemah=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Translate(args)) => translate::run(args, &cli).await,
        Some(Commands::Providers) | None => providers::run(&cli).await,
        Some(Commands::Config(args)) => config::run(args, &cli).await,
        Some(Commands::Reset) => reset::run(&cli).await,
        Some(Commands::Session(args)) => session::run(args, &cli).await,
    };

    let code = match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e}");
            }
            ExitCode::for_error(&e)
        }
    };

    std::process::exit(code as i32);
}
