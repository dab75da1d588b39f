//! Candidate walk producing the bookable slot labels.
//!
//! For each open interval the generator steps a candidate start across the
//! time grid, drops candidates that would overrun the interval, collide with
//! a busy interval, or fall inside today's lead-time cutoff, and collects
//! the survivors as business-local "HH:MM" labels.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::Clock;
use crate::error::{EngineError, Result};
use crate::grid::{self, Interval};
use crate::occupancy;
use crate::rules;
use crate::store::AvailabilityStore;

/// Knobs for slot generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPolicy {
    /// Grid step between candidate starts, in minutes.
    pub grid_minutes: u32,
    /// Minimum notice before the first bookable slot today, in minutes.
    pub lead_time_minutes: i64,
}

impl Default for SlotPolicy {
    /// 15-minute grid, 15 minutes of lead time.
    fn default() -> Self {
        Self {
            grid_minutes: 15,
            lead_time_minutes: 15,
        }
    }
}

/// True when `candidate` overlaps any busy interval.
///
/// Touching endpoints do not block: a reservation ending at 10:00 leaves a
/// slot starting at 10:00 legal, and vice versa. The reservation-creation
/// transaction uses this same predicate to re-validate a chosen slot before
/// committing.
pub fn is_blocked(candidate: &Interval, busy: &[Interval]) -> bool {
    busy.iter().any(|b| candidate.overlaps(b))
}

/// Compute bookable slot labels for one day from already-resolved inputs.
///
/// `open` are the business's open intervals for `date`, `busy` the occupied
/// intervals, `now_local` the current instant in the business timezone (see
/// [`grid::now_in`]). When `date` is the current date, candidates earlier
/// than `quantize_ceil(now_local + lead_time)` are pushed up to that cutoff.
///
/// Candidates step by `policy.grid_minutes`, never by the requested
/// duration, so a long appointment still offers every grid-aligned start
/// that fits. The result is sorted by wall-clock label and deduplicated
/// across overlapping open intervals. Durations outside the usable range
/// (zero or less, or longer than a week) produce no slots; the engine entry
/// point rejects them as `InvalidDuration` before reaching this walk.
pub fn day_slots(
    date: NaiveDate,
    duration_minutes: i64,
    open: &[Interval],
    busy: &[Interval],
    now_local: DateTime<Tz>,
    policy: SlotPolicy,
) -> Vec<String> {
    if duration_minutes <= 0 || duration_minutes > grid::MAX_DURATION_MINUTES {
        return Vec::new();
    }
    let duration = Duration::minutes(duration_minutes);
    let grid_step = Duration::minutes(i64::from(policy.grid_minutes.max(1)));

    let cutoff = if date == now_local.date_naive() {
        Some(grid::quantize_ceil(
            now_local + Duration::minutes(policy.lead_time_minutes),
            policy.grid_minutes,
        ))
    } else {
        None
    };

    // Zero-padded "HH:MM" sorts lexicographically in wall-clock order, so
    // the set is both the dedup and the final ordering.
    let mut labels: BTreeSet<String> = BTreeSet::new();
    for window in open {
        let mut candidate = window.start;
        if let Some(cutoff) = cutoff {
            if candidate < cutoff {
                candidate = cutoff;
            }
        }
        while candidate + duration <= window.end {
            let label = grid::slot_label(candidate);
            if !labels.contains(&label) {
                let span = Interval {
                    start: candidate,
                    end: candidate + duration,
                };
                if !is_blocked(&span, busy) {
                    labels.insert(label);
                }
            }
            candidate = candidate + grid_step;
        }
    }

    labels.into_iter().collect()
}

/// Compute the bookable slots for a business on a date.
///
/// This is the engine's entry point: it snapshots the business's rules and
/// the day's active reservations from `store`, resolves both against the
/// business timezone, and walks the candidate grid. Dates fully in the
/// business-local past return an empty list without touching the store.
///
/// The two store reads are independent snapshots; a reservation committed
/// between a read and the caller's booking attempt can make the result
/// stale, which is tolerated because the reservation-creation transaction
/// re-validates with [`is_blocked`].
///
/// # Errors
/// Returns `EngineError::InvalidDuration` when `duration_minutes` is zero
/// or less, or longer than a week, and propagates
/// `EngineError::StoreUnavailable` from the store unchanged. A day with no
/// applicable rules or no remaining capacity is `Ok` with an empty vector,
/// never an error.
pub fn compute_slots(
    store: &dyn AvailabilityStore,
    clock: &dyn Clock,
    business_id: &str,
    date: NaiveDate,
    duration_minutes: i64,
    tz: Tz,
    policy: SlotPolicy,
) -> Result<Vec<String>> {
    if duration_minutes <= 0 || duration_minutes > grid::MAX_DURATION_MINUTES {
        return Err(EngineError::InvalidDuration(duration_minutes));
    }

    let now_local = grid::now_in(clock, tz);
    if date < now_local.date_naive() {
        return Ok(Vec::new());
    }

    let rules = store.availability_rules(business_id)?;
    let reservations = store.active_reservations(business_id, date)?;

    let open = rules::open_intervals(date, tz, &rules);
    let busy = occupancy::busy_intervals(tz, &reservations);

    let slots = day_slots(date, duration_minutes, &open, &busy, now_local, policy);
    debug!(
        business_id,
        %date,
        duration_minutes,
        open_intervals = open.len(),
        busy_intervals = busy.len(),
        slots = slots.len(),
        "computed availability"
    );
    Ok(slots)
}
