//! Local credits meter and its polling loop.
//!
//! Only the last-refill timestamp is durable; the counter itself starts at
//! the cap on each run and is adjusted by spends and refills. Every tick
//! recomputes from the persisted timestamp, so overlapping or skipped
//! ticks cannot double count. None of this is authoritative over backend
//! quota enforcement.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use pixelift_core::models::{
    apply_refill, format_countdown, CreditState, MAX_CREDITS, REFILL_INTERVAL_MS,
};
use pixelift_core::{AppError, KeyValueStore, KEY_LAST_REFILL};
use serde::Serialize;
use tokio::sync::watch;
use tracing::info;

/// What one tick reports for display.
#[derive(Debug, Clone, Serialize)]
pub struct CreditsSnapshot {
    pub credits: u32,
    pub until_next_ms: i64,
    /// Rendered as "{h}h {m}m".
    pub countdown: String,
}

pub struct CreditsMeter {
    store: Arc<dyn KeyValueStore>,
    credits: u32,
}

impl CreditsMeter {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            credits: MAX_CREDITS,
        }
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    /// Spend one credit, floored at zero. Called when an enhancement run
    /// completes; display-only bookkeeping.
    pub fn spend(&mut self) {
        self.credits = self.credits.saturating_sub(1);
    }

    /// The current counter paired with the persisted refill reference.
    pub fn state(&self) -> Result<CreditState, AppError> {
        let last_refill_epoch_ms = self
            .store
            .get(KEY_LAST_REFILL)?
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0);
        Ok(CreditState {
            credits: self.credits,
            last_refill_epoch_ms,
        })
    }

    /// One poll at the current wall clock.
    pub fn tick(&mut self) -> Result<CreditsSnapshot, AppError> {
        self.tick_at(Utc::now().timestamp_millis())
    }

    /// One poll at an explicit instant: re-read the persisted timestamp,
    /// apply the refill rule, persist the instant when a refill happened.
    /// A missing timestamp initializes to `now`: no immediate refill and a
    /// full countdown.
    pub fn tick_at(&mut self, now_ms: i64) -> Result<CreditsSnapshot, AppError> {
        let last_refill = match self.store.get(KEY_LAST_REFILL)? {
            Some(raw) => match raw.parse::<i64>() {
                Ok(ms) => ms,
                Err(_) => {
                    // Corrupt value: start the schedule over.
                    self.store.set(KEY_LAST_REFILL, &now_ms.to_string())?;
                    now_ms
                }
            },
            None => {
                self.store.set(KEY_LAST_REFILL, &now_ms.to_string())?;
                now_ms
            }
        };

        let outcome = apply_refill(self.credits, last_refill, now_ms);
        if outcome.refilled > 0 {
            self.credits = outcome.credits;
            self.store.set(KEY_LAST_REFILL, &now_ms.to_string())?;
            info!(refilled = outcome.refilled, credits = self.credits, "credits refilled");
        }

        Ok(CreditsSnapshot {
            credits: self.credits,
            until_next_ms: outcome.until_next_ms,
            countdown: format_countdown(outcome.until_next_ms),
        })
    }

    /// Cooperative 1-second polling loop. A single task owns the meter, so
    /// ticks never overlap; flipping the shutdown signal stops the loop
    /// after the current tick.
    pub async fn run(
        &mut self,
        mut shutdown: watch::Receiver<bool>,
        mut on_tick: impl FnMut(CreditsSnapshot),
    ) -> Result<(), AppError> {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        loop {
            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        return Ok(());
                    }
                }
                _ = interval.tick() => {
                    on_tick(self.tick()?);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelift_core::MemoryStore;

    const HOUR_MS: i64 = 60 * 60 * 1000;

    fn meter_with_store() -> (CreditsMeter, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (CreditsMeter::new(store.clone()), store)
    }

    #[test]
    fn first_tick_initializes_timestamp_with_full_countdown() {
        let (mut meter, store) = meter_with_store();
        let now = 1_700_000_000_000;

        let snapshot = meter.tick_at(now).unwrap();
        assert_eq!(snapshot.credits, MAX_CREDITS);
        assert_eq!(snapshot.until_next_ms, REFILL_INTERVAL_MS);
        assert_eq!(snapshot.countdown, "8h 0m");
        assert_eq!(
            store.get(KEY_LAST_REFILL).unwrap().as_deref(),
            Some(now.to_string().as_str())
        );
    }

    #[test]
    fn nine_hours_since_refill_adds_one_credit_and_resets_schedule() {
        let (mut meter, store) = meter_with_store();
        let now = 1_700_000_000_000;
        store
            .set(KEY_LAST_REFILL, &(now - 9 * HOUR_MS).to_string())
            .unwrap();
        meter.spend();
        meter.spend();
        assert_eq!(meter.credits(), 1);

        let snapshot = meter.tick_at(now).unwrap();
        assert_eq!(snapshot.credits, 2);
        // Countdown reflects the 1-hour remainder of the elapsed time.
        assert_eq!(snapshot.countdown, "7h 0m");
        // The refill persisted now as the new reference.
        assert_eq!(
            store.get(KEY_LAST_REFILL).unwrap().as_deref(),
            Some(now.to_string().as_str())
        );
    }

    #[test]
    fn at_cap_nothing_refills_and_timestamp_stays() {
        let (mut meter, store) = meter_with_store();
        let now = 1_700_000_000_000;
        let last = now - 9 * HOUR_MS;
        store.set(KEY_LAST_REFILL, &last.to_string()).unwrap();

        let snapshot = meter.tick_at(now).unwrap();
        assert_eq!(snapshot.credits, MAX_CREDITS);
        assert_eq!(
            store.get(KEY_LAST_REFILL).unwrap().as_deref(),
            Some(last.to_string().as_str())
        );
    }

    #[test]
    fn repeated_ticks_never_leave_valid_range() {
        let (mut meter, store) = meter_with_store();
        let start = 1_700_000_000_000;
        store.set(KEY_LAST_REFILL, &start.to_string()).unwrap();
        meter.spend();
        meter.spend();
        meter.spend();
        assert_eq!(meter.credits(), 0);

        // A tick every second for a simulated day, independent of how many
        // ticks actually land.
        for minute in 0..(24 * 60) {
            let snapshot = meter.tick_at(start + minute * 60 * 1000).unwrap();
            assert!(snapshot.credits <= MAX_CREDITS);
        }
        // 24h elapsed in 8h steps refills all three.
        assert_eq!(meter.credits(), MAX_CREDITS);
    }

    #[test]
    fn corrupt_timestamp_restarts_the_schedule() {
        let (mut meter, store) = meter_with_store();
        store.set(KEY_LAST_REFILL, "not-a-number").unwrap();
        let now = 1_700_000_000_000;

        let snapshot = meter.tick_at(now).unwrap();
        assert_eq!(snapshot.until_next_ms, REFILL_INTERVAL_MS);
        assert_eq!(
            store.get(KEY_LAST_REFILL).unwrap().as_deref(),
            Some(now.to_string().as_str())
        );
    }

    #[test]
    fn state_pairs_counter_with_persisted_reference() {
        let (mut meter, store) = meter_with_store();
        store.set(KEY_LAST_REFILL, "1700000000000").unwrap();
        meter.spend();
        let state = meter.state().unwrap();
        assert_eq!(state.credits, 2);
        assert_eq!(state.last_refill_epoch_ms, 1_700_000_000_000);
    }

    #[test]
    fn spend_floors_at_zero() {
        let (mut meter, _store) = meter_with_store();
        for _ in 0..5 {
            meter.spend();
        }
        assert_eq!(meter.credits(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn run_loop_ticks_and_stops_on_shutdown() {
        let (mut meter, _store) = meter_with_store();
        let (tx, rx) = watch::channel(false);

        let ticks = std::sync::Arc::new(std::sync::Mutex::new(0u32));
        let counter = ticks.clone();

        let loop_fut = meter.run(rx, move |_snapshot| {
            let mut n = counter.lock().unwrap();
            *n += 1;
            if *n == 3 {
                tx.send(true).unwrap();
            }
        });
        loop_fut.await.unwrap();

        assert_eq!(*ticks.lock().unwrap(), 3);
    }
}
