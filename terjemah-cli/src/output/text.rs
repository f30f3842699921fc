//! Text output formatting with progress bars and colors.

use std::time::Duration;
use terjemah_core::{ProviderConfig, TranslationRequest, TranslationResult};
use terjemah_fetch::DispatchAttempt;

use super::{CredentialState, ProviderRow};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

// Progress bar characters
const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    bar_width: usize,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            bar_width: 10,
        }
    }

    // ========================================================================
    // Translation
    // ========================================================================

    /// Formats a translation with its provider line.
    pub fn format_translation(
        &self,
        request: &TranslationRequest,
        result: &TranslationResult,
    ) -> String {
        format!(
            "{}\n{}",
            result.translated_text,
            self.dim(&format!(
                "{} → {} via {} (confidence {:.2})",
                request.source, request.target, result.provider_name, result.confidence
            ))
        )
    }

    /// Formats the attempt log of a dispatch.
    pub fn format_attempts(&self, attempts: &[DispatchAttempt]) -> String {
        attempts
            .iter()
            .map(|attempt| {
                let mark = if attempt.success {
                    self.green("✓")
                } else {
                    self.red("✗")
                };
                let mut line = format!(
                    "  {} {:<15} {}",
                    mark,
                    attempt.provider_id,
                    self.dim(&format!("{}ms", attempt.duration.as_millis()))
                );
                if let Some(error) = &attempt.error {
                    line.push_str(&format!("  {error}"));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ========================================================================
    // Providers
    // ========================================================================

    /// Formats provider list header.
    pub fn format_providers_header(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.bold(&format!("{:<18}", "Provider")),
            self.bold(&format!("{:<8}", "Priority")),
            self.bold(&format!("{:<8}", "Enabled")),
            self.bold(&format!("{:<28}", "Quota")),
            self.bold(&format!("{:<8}", "Key")),
            self.bold("Tier")
        )
    }

    /// Formats a single provider line.
    pub fn format_provider_line(&self, row: &ProviderRow) -> String {
        let config = &row.config;
        let enabled = if config.enabled {
            self.green("✓")
        } else {
            self.dim("−")
        };

        let remaining_percent = 100.0 - config.used_percent();
        let quota = format!("{}/{}", config.used_today, config.daily_quota);
        let usage = format!(
            "{} {:<width$}",
            self.progress_bar(remaining_percent),
            quota,
            width = 27usize.saturating_sub(self.bar_width)
        );

        let label = row.credential.label();
        let key = match row.credential {
            CredentialState::Missing => self.red(label),
            CredentialState::Stored | CredentialState::Environment => self.green(label),
            CredentialState::NotRequired => self.dim(label),
        };

        format!(
            "{:<18} {:<8} {}{} {} {}{} {}",
            config.name,
            config.priority,
            enabled,
            " ".repeat(7),
            usage,
            key,
            " ".repeat(8usize.saturating_sub(label.chars().count())),
            self.dim(row.tier.display_name())
        )
    }

    /// Formats the order providers would be tried in right now.
    pub fn format_dispatch_order(&self, candidates: &[ProviderConfig]) -> String {
        if candidates.is_empty() {
            return format!("Next dispatch: {}", self.red("no provider available"));
        }
        let names: Vec<&str> = candidates.iter().map(|p| p.id.as_str()).collect();
        format!("Next dispatch: {}", self.cyan(&names.join(" → ")))
    }

    /// Formats how to configure a missing key for a provider.
    pub fn format_key_hint(
        &self,
        id: &str,
        env_var: Option<&str>,
        dashboard_url: Option<&str>,
    ) -> String {
        let mut hint = format!(
            "{} {}: run `terjemah config key {id} <KEY>`",
            self.yellow("!"),
            self.bold(id)
        );
        if let Some(var) = env_var {
            hint.push_str(&format!(" or set {var}"));
        }
        if let Some(url) = dashboard_url {
            hint.push_str(&format!("\n    Get a key at {}", self.cyan(url)));
        }
        hint
    }

    /// Formats the time left until the daily reset.
    pub fn format_reset_countdown(&self, until: Duration) -> String {
        let minutes = until.as_secs() / 60;
        let text = if minutes < 60 {
            format!("in {} minute{}", minutes, if minutes == 1 { "" } else { "s" })
        } else {
            let hours = minutes / 60;
            let mins = minutes % 60;
            if mins > 0 {
                format!("in {hours}h {mins}m")
            } else {
                format!("in {} hour{}", hours, if hours == 1 { "" } else { "s" })
            }
        };
        format!("Usage resets {}", self.dim(&text))
    }

    /// Formats the state of a provider after a config change.
    pub fn format_provider_update(&self, config: &ProviderConfig) -> String {
        format!(
            "{} {}: {}, priority {}, quota {}/{}, key {}",
            self.green("✓"),
            self.bold(&config.name),
            if config.enabled { "enabled" } else { "disabled" },
            config.priority,
            config.used_today,
            config.daily_quota,
            if config.credential().is_some() { "set" } else { "not set" }
        )
    }

    /// Formats an error message.
    pub fn format_error(&self, context: &str, error: &str) -> String {
        format!("{}: {} - {}", self.bold(context), self.red("Error"), error)
    }

    /// Formats a progress bar.
    pub fn progress_bar(&self, percent_remaining: f64) -> String {
        let fraction = (percent_remaining / 100.0).clamp(0.0, 1.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let filled = ((fraction * self.bar_width as f64).round() as usize).min(self.bar_width);
        let empty = self.bar_width - filled;

        let bar = format!(
            "{}{}",
            BAR_FULL.to_string().repeat(filled),
            BAR_EMPTY.to_string().repeat(empty)
        );

        self.color_for_percent(percent_remaining, &bar)
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn color_for_percent(&self, percent: f64, text: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }

        if percent < 20.0 {
            self.red(text)
        } else if percent < 50.0 {
            self.yellow(text)
        } else {
            self.green(text)
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}
