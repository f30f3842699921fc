//! Translation request and result types.

use serde::{Deserialize, Serialize};

use super::language::Language;
use super::provider::ProviderTier;

/// One piece of text to translate between two languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Source text. Callers are expected to pass non-empty text.
    pub text: String,
    /// Language of `text`.
    pub source: Language,
    /// Language to translate into.
    pub target: Language,
}

impl TranslationRequest {
    /// Creates a new request.
    pub fn new(text: impl Into<String>, source: Language, target: Language) -> Self {
        Self {
            text: text.into(),
            source,
            target,
        }
    }
}

/// Output of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    /// Translated text.
    pub translated_text: String,
    /// Id of the provider that produced the translation.
    pub provider_id: String,
    /// Display name of that provider.
    pub provider_name: String,
    /// Static confidence of the provider's tier.
    pub confidence: f64,
}

impl TranslationResult {
    /// Creates a result whose confidence comes from the provider tier.
    pub fn new(
        translated_text: impl Into<String>,
        provider_id: impl Into<String>,
        provider_name: impl Into<String>,
        tier: ProviderTier,
    ) -> Self {
        Self {
            translated_text: translated_text.into(),
            provider_id: provider_id.into(),
            provider_name: provider_name.into(),
            confidence: tier.confidence(),
        }
    }
}
