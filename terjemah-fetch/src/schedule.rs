//! Daily quota reset scheduling.
//!
//! Usage counters are zeroed once at the next local midnight and then every
//! 24 hours while the timer runs.

use chrono::{DateTime, Days, TimeZone};
use std::sync::Arc;
use std::time::Duration;
use terjemah_core::ProviderTable;
use terjemah_store::{ProviderSettingsStore, StoreError};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Interval between resets after the first one.
pub const RESET_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

/// Shortest period the reset timer accepts.
pub const MIN_RESET_PERIOD: Duration = Duration::from_secs(1);

// ============================================================================
// Reset Schedule
// ============================================================================

/// When the reset timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetSchedule {
    /// Delay before the first reset.
    pub first_delay: Duration,
    /// Interval between subsequent resets.
    pub period: Duration,
}

impl ResetSchedule {
    /// Resets at the next local midnight, then daily.
    pub fn daily() -> Self {
        Self::daily_from(&chrono::Local::now())
    }

    /// Resets at the midnight following `now` in its time zone, then daily.
    pub fn daily_from<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self {
            first_delay: duration_until_next_midnight(now),
            period: RESET_PERIOD,
        }
    }

    /// Arbitrary schedule, mostly for tests.
    ///
    /// `period` is raised to [`MIN_RESET_PERIOD`] if shorter.
    pub fn new(first_delay: Duration, period: Duration) -> Self {
        Self {
            first_delay,
            period: period.max(MIN_RESET_PERIOD),
        }
    }
}

impl Default for ResetSchedule {
    fn default() -> Self {
        Self::daily()
    }
}

/// Time from `now` until the start of the next calendar day in `now`'s zone.
///
/// If that midnight does not exist (a DST gap), the earliest valid instant
/// after the gap is used. Falls back to a full period if no instant can be
/// computed.
pub fn duration_until_next_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> Duration {
    let next = now
        .date_naive()
        .checked_add_days(Days::new(1))
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .and_then(|midnight| midnight.and_local_timezone(now.timezone()).earliest());

    match next {
        Some(next) => (next - now.clone()).to_std().unwrap_or(RESET_PERIOD),
        None => {
            warn!("Could not compute next midnight, using a full period");
            RESET_PERIOD
        }
    }
}

// ============================================================================
// Reset
// ============================================================================

/// Zeroes every usage counter and persists the collection.
///
/// The table lock is held while saving so writes land in order.
pub(crate) async fn reset_and_persist(
    providers: &RwLock<ProviderTable>,
    store: &ProviderSettingsStore,
) -> Result<(), StoreError> {
    let mut table = providers.write().await;
    table.reset_usage();
    store.save(&table.to_vec()).await?;
    info!(providers = table.len(), "Daily usage reset");
    Ok(())
}

/// Spawns the periodic reset task.
///
/// Must be called from within a Tokio runtime.
pub(crate) fn spawn_reset_task(
    providers: Arc<RwLock<ProviderTable>>,
    store: ProviderSettingsStore,
    schedule: ResetSchedule,
) -> JoinHandle<()> {
    debug!(
        first_delay_secs = schedule.first_delay.as_secs(),
        period_secs = schedule.period.as_secs(),
        "Scheduling daily usage reset"
    );

    // The fields are public, so a zero period can still arrive here.
    let period = schedule.period.max(MIN_RESET_PERIOD);

    tokio::spawn(async move {
        let mut ticks = tokio::time::interval_at(Instant::now() + schedule.first_delay, period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticks.tick().await;
            if let Err(e) = reset_and_persist(&providers, &store).await {
                warn!(error = %e, "Failed to persist daily usage reset");
            }
        }
    })
}

// ============================================================================
// Tests
// ============================================================================
