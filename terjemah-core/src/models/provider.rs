//! Provider-related types.
//!
//! This module contains types related to translation providers:
//! - [`ProviderTier`] - Static quality tier (drives the confidence score)
//! - [`ProviderConfig`] - Mutable per-provider configuration and usage
//! - [`ProviderUpdate`] - Partial update applied to a provider
//! - [`ProviderTable`] - All providers, in registration order

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

// ============================================================================
// Provider Tier
// ============================================================================

/// Quality tier of a translation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderTier {
    /// LLM-based translation (chat completion).
    Llm,
    /// Commercial machine translation API.
    Commercial,
    /// Open-source translation service.
    OpenService,
    /// Free public translation memory.
    Public,
}

impl ProviderTier {
    /// Static confidence reported for results from this tier.
    pub fn confidence(&self) -> f64 {
        match self {
            Self::Llm => 0.95,
            Self::Commercial => 0.90,
            Self::OpenService | Self::Public => 0.80,
        }
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Llm => "LLM",
            Self::Commercial => "Commercial",
            Self::OpenService => "Open Service",
            Self::Public => "Public",
        }
    }
}

impl fmt::Display for ProviderTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Configuration and daily usage for one translation provider.
///
/// Serialized in the persisted settings shape:
/// `{ id, name, enabled, priority, dailyQuota, usedToday, apiKey? }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Stable identifier (e.g. "gpt4", "google").
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether the provider may be selected.
    pub enabled: bool,
    /// Priority rank; lower is tried first.
    pub priority: u32,
    /// Maximum successful calls per day.
    pub daily_quota: u32,
    /// Successful calls since the last reset.
    pub used_today: u32,
    /// Credential, if the provider needs one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl ProviderConfig {
    /// Creates an enabled provider with zero usage and no credential.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        priority: u32,
        daily_quota: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            enabled: true,
            priority,
            daily_quota,
            used_today: 0,
            api_key: None,
        }
    }

    /// Sets the credential.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the used-today counter.
    pub fn with_used_today(mut self, used_today: u32) -> Self {
        self.used_today = used_today;
        self
    }

    /// Returns true while today's usage is below the quota.
    pub fn has_quota(&self) -> bool {
        self.used_today < self.daily_quota
    }

    /// Returns true if the provider may be selected for a dispatch.
    pub fn is_available(&self) -> bool {
        self.enabled && self.has_quota()
    }

    /// Calls left today.
    pub fn remaining_quota(&self) -> u32 {
        self.daily_quota.saturating_sub(self.used_today)
    }

    /// Percentage of today's quota already used (0-100).
    pub fn used_percent(&self) -> f64 {
        if self.daily_quota == 0 {
            return 100.0;
        }
        (f64::from(self.used_today) / f64::from(self.daily_quota) * 100.0).min(100.0)
    }

    /// Returns the credential if one is set and non-empty.
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Applies a partial update in place.
    pub fn apply(&mut self, update: &ProviderUpdate) {
        if let Some(name) = &update.name {
            self.name.clone_from(name);
        }
        if let Some(enabled) = update.enabled {
            self.enabled = enabled;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(quota) = update.daily_quota {
            self.daily_quota = quota;
        }
        if let Some(used) = update.used_today {
            self.used_today = used;
        }
        if let Some(key) = &update.api_key {
            // An empty string clears the credential.
            self.api_key = if key.is_empty() { None } else { Some(key.clone()) };
        }
    }
}

// ============================================================================
// Provider Update
// ============================================================================

/// A partial update; `None` fields leave the provider unchanged.
///
/// Persisted entries are read back as updates too, so settings written by
/// an older build (or edited by hand) only override the fields they carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderUpdate {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New enabled flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// New priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    /// New daily quota.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_quota: Option<u32>,
    /// New used-today counter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_today: Option<u32>,
    /// New credential; empty clears it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl ProviderUpdate {
    /// Update that only toggles the enabled flag.
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
            ..Default::default()
        }
    }

    /// Update that only changes the priority.
    pub fn priority(priority: u32) -> Self {
        Self {
            priority: Some(priority),
            ..Default::default()
        }
    }

    /// Update that only changes the daily quota.
    pub fn daily_quota(quota: u32) -> Self {
        Self {
            daily_quota: Some(quota),
            ..Default::default()
        }
    }

    /// Update that only changes the credential.
    pub fn api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Returns true if the update changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A persisted provider entry, matched onto the defaults by id.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredProvider {
    /// Provider id the entry belongs to.
    pub id: String,
    /// Fields present in the stored entry.
    #[serde(flatten)]
    pub fields: ProviderUpdate,
}

// ============================================================================
// Provider Table
// ============================================================================

/// All configured providers, in registration order.
///
/// This is the explicit configuration the dispatcher owns. Every mutation
/// returns the updated provider so callers never need to re-read shared state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderTable {
    providers: Vec<ProviderConfig>,
}

impl ProviderTable {
    /// Creates a table from provider configurations.
    ///
    /// Later entries replace earlier ones with the same id.
    pub fn new(providers: impl IntoIterator<Item = ProviderConfig>) -> Self {
        let mut table = Self::default();
        for provider in providers {
            table.insert(provider);
        }
        table
    }

    /// Inserts a provider, replacing any provider with the same id.
    pub fn insert(&mut self, provider: ProviderConfig) {
        match self.providers.iter_mut().find(|p| p.id == provider.id) {
            Some(existing) => *existing = provider,
            None => self.providers.push(provider),
        }
    }

    /// Gets a provider by id.
    pub fn get(&self, id: &str) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut ProviderConfig, CoreError> {
        self.providers
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProviderNotFound(id.to_string()))
    }

    /// Iterates providers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.providers.iter()
    }

    /// Returns the number of providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if the table holds no providers.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Returns a snapshot of all providers.
    pub fn to_vec(&self) -> Vec<ProviderConfig> {
        self.providers.clone()
    }

    /// Applies a partial update to one provider and returns its new state.
    pub fn apply(&mut self, id: &str, update: &ProviderUpdate) -> Result<ProviderConfig, CoreError> {
        let provider = self.get_mut(id)?;
        provider.apply(update);
        Ok(provider.clone())
    }

    /// Overlays persisted entries onto the table, matching by id.
    ///
    /// Entries for unknown ids are ignored. Returns how many were applied.
    pub fn overlay(&mut self, stored: &[StoredProvider]) -> usize {
        let mut applied = 0;
        for entry in stored {
            if let Ok(provider) = self.get_mut(&entry.id) {
                provider.apply(&entry.fields);
                applied += 1;
            }
        }
        applied
    }

    /// Counts one successful call against a provider's quota.
    pub fn record_success(&mut self, id: &str) -> Result<ProviderConfig, CoreError> {
        let provider = self.get_mut(id)?;
        provider.used_today = provider.used_today.saturating_add(1);
        Ok(provider.clone())
    }

    /// Zeroes every provider's used-today counter.
    pub fn reset_usage(&mut self) {
        for provider in &mut self.providers {
            provider.used_today = 0;
        }
    }

    /// Providers eligible for a dispatch, in the order they should be tried.
    ///
    /// Only ids listed in `fallback_order` are considered. Eligible providers
    /// are sorted by ascending priority; equal priorities keep their
    /// fallback-order position (the sort is stable).
    pub fn candidates<S: AsRef<str>>(&self, fallback_order: &[S]) -> Vec<ProviderConfig> {
        let mut candidates: Vec<ProviderConfig> = fallback_order
            .iter()
            .filter_map(|id| self.get(id.as_ref()))
            .filter(|p| p.is_available())
            .cloned()
            .collect();
        candidates.sort_by_key(|p| p.priority);
        candidates
    }
}

impl<'a> IntoIterator for &'a ProviderTable {
    type Item = &'a ProviderConfig;
    type IntoIter = std::slice::Iter<'a, ProviderConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.providers.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
