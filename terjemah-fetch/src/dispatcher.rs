//! Translation dispatcher.
//!
//! The dispatcher owns the provider table and tries eligible providers in
//! order until one translates the request. It also owns the configuration
//! operations and the daily quota reset timer.
//!
//! ## Candidate order
//!
//! A provider is a candidate when it is listed in the fallback order, is
//! enabled and has quota left. Candidates are tried by ascending priority;
//! equal priorities keep their fallback-order position.
//!
//! ## Concurrency
//!
//! The table sits behind an async `RwLock`. Candidates are snapshotted
//! before any adapter is called and the lock is never held across an
//! adapter call, so a reset that lands mid-dispatch is not observed by that
//! dispatch.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use terjemah_core::{
    ProviderConfig, ProviderTable, ProviderUpdate, TranslationRequest, TranslationResult,
};
use terjemah_store::ProviderSettingsStore;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::adapter::{AdapterRegistry, TranslationAdapter};
use crate::context::TranslateContext;
use crate::error::DispatchError;
use crate::schedule::{ResetSchedule, reset_and_persist, spawn_reset_task};

// ============================================================================
// Dispatch Attempt
// ============================================================================

/// Record of a single provider attempt.
#[derive(Debug, Clone)]
pub struct DispatchAttempt {
    /// The provider that was attempted.
    pub provider_id: String,
    /// Whether the attempt succeeded.
    pub success: bool,
    /// Error if the attempt failed.
    pub error: Option<String>,
    /// How long the attempt took.
    pub duration: Duration,
}

impl DispatchAttempt {
    /// Creates a successful attempt record.
    pub fn success(provider_id: impl Into<String>, duration: Duration) -> Self {
        Self {
            provider_id: provider_id.into(),
            success: true,
            error: None,
            duration,
        }
    }

    /// Creates a failed attempt record.
    pub fn failure(
        provider_id: impl Into<String>,
        error: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            success: false,
            error: Some(error.into()),
            duration,
        }
    }
}

// ============================================================================
// Dispatch Outcome
// ============================================================================

/// The outcome of one dispatch, with every attempt made.
#[derive(Debug)]
pub struct DispatchOutcome {
    /// The result (success or final error).
    pub result: Result<TranslationResult, DispatchError>,
    /// All attempts made, in order.
    pub attempts: Vec<DispatchAttempt>,
    /// Total duration of the dispatch.
    pub duration: Duration,
}

impl DispatchOutcome {
    /// Returns true if some provider translated the request.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Returns the number of providers that were tried.
    pub fn attempts_count(&self) -> usize {
        self.attempts.len()
    }

    /// Returns the id of the provider that succeeded, if any.
    pub fn successful_provider(&self) -> Option<&str> {
        self.result.as_ref().ok().map(|r| r.provider_id.as_str())
    }

    /// Returns all errors that occurred.
    pub fn errors(&self) -> Vec<&str> {
        self.attempts
            .iter()
            .filter_map(|a| a.error.as_deref())
            .collect()
    }
}

// ============================================================================
// Translation Dispatcher
// ============================================================================

/// Multi-provider translation dispatcher.
pub struct TranslationDispatcher {
    providers: Arc<RwLock<ProviderTable>>,
    adapters: AdapterRegistry,
    fallback_order: Vec<String>,
    credential_fallbacks: HashMap<String, String>,
    store: ProviderSettingsStore,
    ctx: TranslateContext,
    reset_task: Mutex<Option<JoinHandle<()>>>,
}

impl TranslationDispatcher {
    /// Creates a builder.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    // ------------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------------

    /// Translates `request` with the first candidate provider that succeeds.
    ///
    /// On success the provider's usage counter is incremented and the
    /// collection is persisted. A persistence failure at that point is
    /// logged and does not fail the translation.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NoProviderAvailable`] if no provider is a
    /// candidate, or [`DispatchError::AllProvidersFailed`] if every
    /// candidate failed.
    pub async fn dispatch(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, DispatchError> {
        self.dispatch_outcome(request).await.result
    }

    /// Like [`Self::dispatch`], but also reports every attempt.
    #[instrument(skip(self, request), fields(source = %request.source, target = %request.target))]
    pub async fn dispatch_outcome(&self, request: &TranslationRequest) -> DispatchOutcome {
        let start = Instant::now();
        let mut attempts = Vec::new();

        let candidates = self.providers.read().await.candidates(&self.fallback_order);
        if candidates.is_empty() {
            warn!("No translation provider is enabled with quota left");
            return DispatchOutcome {
                result: Err(DispatchError::NoProviderAvailable),
                attempts,
                duration: start.elapsed(),
            };
        }

        debug!(
            candidates = ?candidates.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            "Dispatching translation"
        );

        for provider in candidates {
            let Some(adapter) = self.adapters.get(&provider.id) else {
                debug!(provider = %provider.id, "No adapter registered, skipping");
                continue;
            };

            let attempt_start = Instant::now();
            let credential = self.credential_for(&provider);

            match adapter.translate(&self.ctx, request, credential).await {
                Ok(text) => {
                    let duration = attempt_start.elapsed();
                    info!(provider = %provider.id, duration = ?duration, "Translation succeeded");

                    self.record_success(&provider.id).await;
                    attempts.push(DispatchAttempt::success(&provider.id, duration));

                    return DispatchOutcome {
                        result: Ok(TranslationResult::new(
                            text,
                            provider.id,
                            provider.name,
                            adapter.tier(),
                        )),
                        attempts,
                        duration: start.elapsed(),
                    };
                }
                Err(error) => {
                    let duration = attempt_start.elapsed();
                    warn!(
                        provider = %provider.id,
                        error = %error,
                        duration = ?duration,
                        "Translation failed, trying next provider"
                    );
                    attempts.push(DispatchAttempt::failure(
                        &provider.id,
                        error.to_string(),
                        duration,
                    ));
                }
            }
        }

        warn!(attempts = attempts.len(), "All translation providers failed");
        DispatchOutcome {
            result: Err(DispatchError::AllProvidersFailed {
                attempts: attempts.len(),
            }),
            attempts,
            duration: start.elapsed(),
        }
    }

    fn credential_for<'a>(&'a self, provider: &'a ProviderConfig) -> Option<&'a str> {
        provider.credential().or_else(|| {
            self.credential_fallbacks
                .get(&provider.id)
                .map(String::as_str)
                .filter(|key| !key.trim().is_empty())
        })
    }

    async fn record_success(&self, id: &str) {
        let mut table = self.providers.write().await;
        match table.record_success(id) {
            Ok(provider) => debug!(provider = id, used_today = provider.used_today, "Usage recorded"),
            Err(e) => {
                warn!(provider = id, error = %e, "Could not record usage");
                return;
            }
        }

        if let Err(e) = self.store.save(&table.to_vec()).await {
            warn!(provider = id, error = %e, "Failed to persist usage");
        }
    }

    // ------------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------------

    /// Snapshot of all providers in registration order.
    pub async fn providers(&self) -> Vec<ProviderConfig> {
        self.providers.read().await.to_vec()
    }

    /// Snapshot of one provider.
    pub async fn provider(&self, id: &str) -> Option<ProviderConfig> {
        self.providers.read().await.get(id).cloned()
    }

    /// Provider ids in fallback order.
    pub fn fallback_order(&self) -> &[String] {
        &self.fallback_order
    }

    /// Returns true if a credential for `id` was supplied outside the
    /// persisted settings.
    pub fn has_fallback_credential(&self, id: &str) -> bool {
        self.credential_fallbacks
            .get(id)
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// Where settings are persisted.
    pub fn settings_location(&self) -> String {
        self.store.backend().location()
    }

    /// Applies a partial update to one provider and persists the collection.
    ///
    /// An empty `api_key` clears the stored credential.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::ProviderNotFound`] for an unknown id, or a
    /// store error if the collection cannot be persisted. The in-memory
    /// update is kept even when persisting fails.
    #[instrument(skip(self, update), fields(provider = %id))]
    pub async fn update_provider(
        &self,
        id: &str,
        update: ProviderUpdate,
    ) -> Result<ProviderConfig, DispatchError> {
        let mut table = self.providers.write().await;
        let updated = table
            .apply(id, &update)
            .map_err(|_| DispatchError::ProviderNotFound(id.to_string()))?;

        self.store.save(&table.to_vec()).await?;
        info!(
            enabled = updated.enabled,
            priority = updated.priority,
            daily_quota = updated.daily_quota,
            has_key = updated.credential().is_some(),
            "Provider updated"
        );
        Ok(updated)
    }

    /// Enables or disables a provider.
    ///
    /// # Errors
    ///
    /// See [`Self::update_provider`].
    pub async fn set_enabled(&self, id: &str, enabled: bool) -> Result<ProviderConfig, DispatchError> {
        self.update_provider(id, ProviderUpdate::enabled(enabled)).await
    }

    /// Sets a provider's priority (lower is tried first).
    ///
    /// # Errors
    ///
    /// See [`Self::update_provider`].
    pub async fn set_priority(&self, id: &str, priority: u32) -> Result<ProviderConfig, DispatchError> {
        self.update_provider(id, ProviderUpdate::priority(priority)).await
    }

    /// Sets a provider's daily quota.
    ///
    /// # Errors
    ///
    /// See [`Self::update_provider`].
    pub async fn set_daily_quota(&self, id: &str, quota: u32) -> Result<ProviderConfig, DispatchError> {
        self.update_provider(id, ProviderUpdate::daily_quota(quota)).await
    }

    /// Sets a provider's API key. An empty key clears it.
    ///
    /// # Errors
    ///
    /// See [`Self::update_provider`].
    pub async fn set_api_key(
        &self,
        id: &str,
        api_key: impl Into<String>,
    ) -> Result<ProviderConfig, DispatchError> {
        self.update_provider(id, ProviderUpdate::api_key(api_key)).await
    }

    /// Zeroes every usage counter now and persists the collection.
    ///
    /// # Errors
    ///
    /// Returns a store error if the collection cannot be persisted.
    pub async fn reset_daily_usage(&self) -> Result<(), DispatchError> {
        reset_and_persist(&self.providers, &self.store).await?;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Reset Timer
    // ------------------------------------------------------------------------

    /// Starts the daily reset timer (next local midnight, then every 24h).
    ///
    /// Returns false if the timer was already running. Must be called from
    /// within a Tokio runtime.
    pub fn start(&self) -> bool {
        self.start_with(ResetSchedule::daily())
    }

    /// Starts the reset timer with a custom schedule.
    ///
    /// Returns false if the timer was already running.
    pub fn start_with(&self, schedule: ResetSchedule) -> bool {
        let mut slot = self.reset_task.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|task| !task.is_finished()) {
            debug!("Reset timer already running");
            return false;
        }

        *slot = Some(spawn_reset_task(
            Arc::clone(&self.providers),
            self.store.clone(),
            schedule,
        ));
        info!(
            first_reset_in_secs = schedule.first_delay.as_secs(),
            "Reset timer started"
        );
        true
    }

    /// Stops the reset timer. Returns false if it was not running.
    pub fn stop(&self) -> bool {
        let task = self
            .reset_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match task {
            Some(task) => {
                task.abort();
                info!("Reset timer stopped");
                true
            }
            None => false,
        }
    }

    /// Returns true while the reset timer is running.
    pub fn is_running(&self) -> bool {
        self.reset_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl Drop for TranslationDispatcher {
    fn drop(&mut self) {
        let slot = self
            .reset_task
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = slot.take() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for TranslationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationDispatcher")
            .field("fallback_order", &self.fallback_order)
            .field("adapters", &self.adapters)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Dispatcher Builder
// ============================================================================

/// Builder for a [`TranslationDispatcher`].
#[derive(Default)]
pub struct DispatcherBuilder {
    defaults: Vec<ProviderConfig>,
    adapters: AdapterRegistry,
    fallback_order: Option<Vec<String>>,
    credential_fallbacks: HashMap<String, String>,
    store: Option<ProviderSettingsStore>,
    ctx: Option<TranslateContext>,
}

impl DispatcherBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider with its default configuration and adapter.
    ///
    /// Registration order is the default fallback order.
    pub fn provider(
        mut self,
        defaults: ProviderConfig,
        adapter: Arc<dyn TranslationAdapter>,
    ) -> Self {
        self.defaults.push(defaults);
        self.adapters.register(adapter);
        self
    }

    /// Sets the fallback order explicitly.
    pub fn fallback_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback_order = Some(order.into_iter().map(Into::into).collect());
        self
    }

    /// Supplies a credential used when `id` has none configured.
    ///
    /// These credentials are never persisted.
    pub fn credential_fallback(mut self, id: impl Into<String>, key: impl Into<String>) -> Self {
        self.credential_fallbacks.insert(id.into(), key.into());
        self
    }

    /// Sets the settings store. Defaults to an in-memory store.
    pub fn store(mut self, store: ProviderSettingsStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the translate context.
    pub fn context(mut self, ctx: TranslateContext) -> Self {
        self.ctx = Some(ctx);
        self
    }

    /// Builds the dispatcher, restoring persisted settings over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Config`] if a provider has no matching
    /// adapter or the fallback order names an unknown provider, or a store
    /// error if saved settings cannot be read.
    pub async fn build(self) -> Result<TranslationDispatcher, DispatchError> {
        for provider in &self.defaults {
            if !self.adapters.contains(&provider.id) {
                return Err(DispatchError::Config(format!(
                    "provider '{}' has no adapter with a matching id",
                    provider.id
                )));
            }
        }

        let mut table = ProviderTable::new(self.defaults.iter().cloned());

        let fallback_order = self
            .fallback_order
            .unwrap_or_else(|| self.defaults.iter().map(|p| p.id.clone()).collect());
        if let Some(unknown) = fallback_order.iter().find(|id| table.get(id).is_none()) {
            return Err(DispatchError::Config(format!(
                "fallback order names unknown provider '{unknown}'"
            )));
        }

        let store = self.store.unwrap_or_else(ProviderSettingsStore::in_memory);
        let stored = store.load().await?;
        let restored = table.overlay(&stored);
        debug!(
            providers = table.len(),
            restored,
            location = %store.backend().location(),
            "Dispatcher ready"
        );

        Ok(TranslationDispatcher {
            providers: Arc::new(RwLock::new(table)),
            adapters: self.adapters,
            fallback_order,
            credential_fallbacks: self.credential_fallbacks,
            store,
            ctx: self.ctx.unwrap_or_default(),
            reset_task: Mutex::new(None),
        })
    }
}
