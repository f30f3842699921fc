//! Session command - translate stdin line by line.
//!
//! The dispatcher stays open for the whole session, so the midnight usage
//! reset runs while it is active. Two commands are understood on their own
//! line: `:swap` flips the direction and `:quit` ends the session.

use anyhow::Result;
use clap::Args;
use terjemah_core::{Language, TranslationRequest};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use super::open_dispatcher;
use super::translate::resolve_direction;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the session command.
#[derive(Args)]
pub struct SessionArgs {
    /// Source language (id, ja). Defaults to Indonesian.
    #[arg(long)]
    pub from: Option<Language>,

    /// Target language (id, ja). Defaults to the other language.
    #[arg(long)]
    pub to: Option<Language>,
}

/// A line of session input.
#[derive(Debug, PartialEq, Eq)]
enum SessionInput<'a> {
    Skip,
    Swap,
    Quit,
    Text(&'a str),
}

fn parse_line(line: &str) -> SessionInput<'_> {
    match line.trim() {
        "" => SessionInput::Skip,
        ":swap" => SessionInput::Swap,
        ":quit" | ":q" => SessionInput::Quit,
        text => SessionInput::Text(text),
    }
}

/// Runs the session command.
pub async fn run(args: &SessionArgs, cli: &Cli) -> Result<()> {
    let (mut source, mut target) = resolve_direction(args.from, args.to, false)?;

    let dispatcher = open_dispatcher(cli).await?;
    dispatcher.start();
    info!(source = %source, target = %target, "Session started");

    let text = TextFormatter::new(!cli.no_color);
    let json = JsonFormatter::new(cli.pretty);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                debug!("Interrupted");
                None
            }
        };
        let Some(line) = line else { break };

        match parse_line(&line) {
            SessionInput::Skip => {}
            SessionInput::Quit => break,
            SessionInput::Swap => {
                std::mem::swap(&mut source, &mut target);
                if !cli.quiet {
                    eprintln!("{source} → {target}");
                }
            }
            SessionInput::Text(input) => {
                let request = TranslationRequest::new(input, source, target);
                match dispatcher.dispatch(&request).await {
                    Ok(result) => match cli.format {
                        OutputFormat::Text => {
                            println!("{}", text.format_translation(&request, &result));
                        }
                        OutputFormat::Json => {
                            println!("{}", json.format_translation(&request, &result, None));
                        }
                    },
                    // A failed line does not end the session.
                    Err(e) => {
                        if !cli.quiet {
                            eprintln!("{}", text.format_error("translate", &e.to_string()));
                        }
                    }
                }
            }
        }
    }

    dispatcher.stop();
    info!("Session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("   "), SessionInput::Skip);
        assert_eq!(parse_line(":swap"), SessionInput::Swap);
        assert_eq!(parse_line(":q"), SessionInput::Quit);
        assert_eq!(parse_line(" selamat pagi \n"), SessionInput::Text("selamat pagi"));
    }
}
