//! Credit refill arithmetic.
//!
//! Credits are a locally tracked, non-authoritative usage-allowance
//! display: one credit returns every eight hours, capped at three. The
//! periodic timer recomputes everything from the persisted last-refill
//! timestamp on every tick, so a missed or overlapping tick never double
//! counts.

use serde::{Deserialize, Serialize};

/// Ceiling of the local credit counter.
pub const MAX_CREDITS: u32 = 3;
/// One credit returns per refill interval (8 hours).
pub const REFILL_INTERVAL_MS: i64 = 8 * 60 * 60 * 1000;

const HOUR_MS: i64 = 60 * 60 * 1000;
const MINUTE_MS: i64 = 60 * 1000;

/// Locally persisted credit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditState {
    /// Always within `[0, MAX_CREDITS]`.
    pub credits: u32,
    /// Epoch milliseconds of the last applied refill.
    pub last_refill_epoch_ms: i64,
}

/// Result of applying the refill rule at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefillOutcome {
    /// Credit count after the refill, within `[0, MAX_CREDITS]`.
    pub credits: u32,
    /// How many credits this application added.
    pub refilled: u32,
    /// Time until the next refill, derived from the pre-refill timestamp:
    /// `interval - (elapsed mod interval)`.
    pub until_next_ms: i64,
}

/// Apply the refill rule: every whole interval elapsed since the last
/// refill adds one credit, up to the cap. The countdown always reflects
/// the remainder of the elapsed time against the interval.
///
/// The caller persists the current time as the new last-refill timestamp
/// exactly when `refilled > 0`.
pub fn apply_refill(credits: u32, last_refill_epoch_ms: i64, now_ms: i64) -> RefillOutcome {
    let credits = credits.min(MAX_CREDITS);
    let elapsed = (now_ms - last_refill_epoch_ms).max(0);
    let intervals = elapsed / REFILL_INTERVAL_MS;
    let until_next_ms = REFILL_INTERVAL_MS - (elapsed % REFILL_INTERVAL_MS);

    if intervals >= 1 && credits < MAX_CREDITS {
        let new_credits = credits.saturating_add(intervals.min(u32::MAX as i64) as u32).min(MAX_CREDITS);
        RefillOutcome {
            credits: new_credits,
            refilled: new_credits - credits,
            until_next_ms,
        }
    } else {
        RefillOutcome {
            credits,
            refilled: 0,
            until_next_ms,
        }
    }
}

/// Render a countdown as `"{h}h {m}m"`.
pub fn format_countdown(ms: i64) -> String {
    let ms = ms.max(0);
    let hours = ms / HOUR_MS;
    let minutes = (ms % HOUR_MS) / MINUTE_MS;
    format!("{}h {}m", hours, minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nine_hours_elapsed_refills_one_credit() {
        let now = 1_700_000_000_000;
        let last = now - 9 * HOUR_MS;
        let outcome = apply_refill(0, last, now);
        assert_eq!(outcome.credits, 1);
        assert_eq!(outcome.refilled, 1);
        // 9h mod 8h leaves a 1h remainder, so 7h until the next refill.
        assert_eq!(outcome.until_next_ms, 7 * HOUR_MS);
        assert_eq!(format_countdown(outcome.until_next_ms), "7h 0m");
    }

    #[test]
    fn credits_never_exceed_cap() {
        let now = 1_700_000_000_000;
        // A week of elapsed time would refill 21 intervals.
        let last = now - 7 * 24 * HOUR_MS;
        let outcome = apply_refill(0, last, now);
        assert_eq!(outcome.credits, MAX_CREDITS);

        // Already at cap: nothing to add, timestamp must not move.
        let outcome = apply_refill(MAX_CREDITS, last, now);
        assert_eq!(outcome.credits, MAX_CREDITS);
        assert_eq!(outcome.refilled, 0);
    }

    #[test]
    fn under_one_interval_only_counts_down() {
        let now = 1_700_000_000_000;
        let last = now - 3 * HOUR_MS;
        let outcome = apply_refill(1, last, now);
        assert_eq!(outcome.credits, 1);
        assert_eq!(outcome.refilled, 0);
        assert_eq!(outcome.until_next_ms, 5 * HOUR_MS);
    }

    #[test]
    fn credits_monotonic_until_cap_over_any_elapsed_time() {
        let now = 1_700_000_000_000;
        for hours in 0..100 {
            for start in 0..=MAX_CREDITS {
                let outcome = apply_refill(start, now - hours * HOUR_MS, now);
                assert!(outcome.credits >= start.min(MAX_CREDITS));
                assert!(outcome.credits <= MAX_CREDITS);
            }
        }
    }

    #[test]
    fn clock_skew_backwards_is_harmless() {
        let now = 1_700_000_000_000;
        // Persisted timestamp in the future (clock went backwards).
        let outcome = apply_refill(2, now + HOUR_MS, now);
        assert_eq!(outcome.credits, 2);
        assert_eq!(outcome.refilled, 0);
        assert_eq!(outcome.until_next_ms, REFILL_INTERVAL_MS);
    }

    #[test]
    fn countdown_formatting() {
        assert_eq!(format_countdown(0), "0h 0m");
        assert_eq!(format_countdown(61 * MINUTE_MS), "1h 1m");
        assert_eq!(format_countdown(REFILL_INTERVAL_MS - 1), "7h 59m");
        assert_eq!(format_countdown(-5), "0h 0m");
    }
}
