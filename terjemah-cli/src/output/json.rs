//! JSON output formatting.

use serde::Serialize;
use terjemah_core::{Language, TranslationRequest, TranslationResult};
use terjemah_fetch::DispatchAttempt;

use super::{CredentialState, ProviderRow};

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, value: &T) -> String {
        let result = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        result.unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }

    /// Formats a translation and, when given, the attempts behind it.
    pub fn format_translation(
        &self,
        request: &TranslationRequest,
        result: &TranslationResult,
        attempts: Option<&[DispatchAttempt]>,
    ) -> String {
        self.format(&TranslationOutput::new(request, result, attempts))
    }

    /// Formats the provider table.
    pub fn format_providers(&self, rows: &[ProviderRow]) -> String {
        let output: Vec<ProviderOutput> = rows.iter().map(ProviderOutput::from).collect();
        self.format(&output)
    }
}

// ============================================================================
// Output Types
// ============================================================================

/// Translation output structure.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationOutput {
    pub source: Language,
    pub target: Language,
    #[serde(flatten)]
    pub result: TranslationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts: Option<Vec<AttemptOutput>>,
}

impl TranslationOutput {
    fn new(
        request: &TranslationRequest,
        result: &TranslationResult,
        attempts: Option<&[DispatchAttempt]>,
    ) -> Self {
        Self {
            source: request.source,
            target: request.target,
            result: result.clone(),
            attempts: attempts.map(|a| a.iter().map(AttemptOutput::from).collect()),
        }
    }
}

/// One provider attempt.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptOutput {
    pub provider_id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u64,
}

impl From<&DispatchAttempt> for AttemptOutput {
    fn from(attempt: &DispatchAttempt) -> Self {
        Self {
            provider_id: attempt.provider_id.clone(),
            success: attempt.success,
            error: attempt.error.clone(),
            duration_ms: u64::try_from(attempt.duration.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Provider output structure.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderOutput {
    pub id: String,
    pub name: String,
    pub tier: String,
    pub enabled: bool,
    pub priority: u32,
    pub daily_quota: u32,
    pub used_today: u32,
    pub remaining: u32,
    pub credential: CredentialState,
}

impl From<&ProviderRow> for ProviderOutput {
    fn from(row: &ProviderRow) -> Self {
        let config = &row.config;
        Self {
            id: config.id.clone(),
            name: config.name.clone(),
            tier: row.tier.display_name().to_string(),
            enabled: config.enabled,
            priority: config.priority,
            daily_quota: config.daily_quota,
            used_today: config.used_today,
            remaining: config.remaining_quota(),
            credential: row.credential,
        }
    }
}
