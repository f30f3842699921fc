//! Translate command - translate a piece of text.

use anyhow::{Result, bail};
use clap::Args;
use terjemah_core::{Language, TranslationRequest};
use tracing::info;

use super::open_dispatcher;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the translate command.
#[derive(Args)]
pub struct TranslateArgs {
    /// Text to translate. Multiple words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Source language (id, ja). Defaults to Indonesian.
    #[arg(long)]
    pub from: Option<Language>,

    /// Target language (id, ja). Defaults to the other language.
    #[arg(long)]
    pub to: Option<Language>,

    /// Swap source and target.
    #[arg(long)]
    pub swap: bool,
}

impl TranslateArgs {
    /// Builds the request from the arguments.
    pub fn request(&self) -> Result<TranslationRequest> {
        let text = self.text.join(" ");
        if text.trim().is_empty() {
            bail!("Nothing to translate");
        }
        let (source, target) = resolve_direction(self.from, self.to, self.swap)?;
        Ok(TranslationRequest::new(text.trim(), source, target))
    }
}

/// Works out the language pair from optional flags.
pub fn resolve_direction(
    from: Option<Language>,
    to: Option<Language>,
    swap: bool,
) -> Result<(Language, Language)> {
    let (source, target) = match (from, to) {
        (Some(source), Some(target)) => (source, target),
        (Some(source), None) => (source, source.opposite()),
        (None, Some(target)) => (target.opposite(), target),
        (None, None) => (Language::Indonesian, Language::Japanese),
    };
    if source == target {
        bail!("Source and target language are both {source}");
    }
    Ok(if swap { (target, source) } else { (source, target) })
}

/// Runs the translate command.
pub async fn run(args: &TranslateArgs, cli: &Cli) -> Result<()> {
    let request = args.request()?;
    info!(source = %request.source, target = %request.target, "Translating");

    let dispatcher = open_dispatcher(cli).await?;
    let outcome = dispatcher.dispatch_outcome(&request).await;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            if cli.verbose {
                eprintln!("{}", formatter.format_attempts(&outcome.attempts));
            }
            let result = outcome.result?;
            println!("{}", formatter.format_translation(&request, &result));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let attempts = outcome.attempts;
            let result = outcome.result?;
            let attempts = cli.verbose.then_some(attempts.as_slice());
            println!("{}", formatter.format_translation(&request, &result, attempts));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_direction() {
        let (source, target) = resolve_direction(None, None, false).unwrap();
        assert_eq!(source, Language::Indonesian);
        assert_eq!(target, Language::Japanese);
    }

    #[test]
    fn test_direction_from_one_side() {
        assert_eq!(
            resolve_direction(Some(Language::Japanese), None, false).unwrap(),
            (Language::Japanese, Language::Indonesian)
        );
        assert_eq!(
            resolve_direction(None, Some(Language::Indonesian), false).unwrap(),
            (Language::Japanese, Language::Indonesian)
        );
    }

    #[test]
    fn test_swap() {
        assert_eq!(
            resolve_direction(None, None, true).unwrap(),
            (Language::Japanese, Language::Indonesian)
        );
    }

    #[test]
    fn test_same_language_rejected() {
        assert!(resolve_direction(Some(Language::Japanese), Some(Language::Japanese), false).is_err());
    }

    #[test]
    fn test_request_joins_words() {
        let args = TranslateArgs {
            text: vec!["selamat".into(), "pagi".into()],
            from: None,
            to: None,
            swap: false,
        };
        let request = args.request().unwrap();
        assert_eq!(request.text, "selamat pagi");
        assert_eq!(request.source, Language::Indonesian);
    }

    #[test]
    fn test_blank_text_rejected() {
        let args = TranslateArgs {
            text: vec!["  ".into()],
            from: None,
            to: None,
            swap: false,
        };
        assert!(args.request().is_err());
    }
}
