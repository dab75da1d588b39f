//! Busy intervals from pending and confirmed reservations.
//!
//! A reservation occupies `[start, start + duration)` on its date. Only
//! pending and confirmed reservations occupy time; cancelled and completed
//! ones are inert no matter what the store returns.

use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::grid::{self, Interval};

/// Lifecycle status of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    /// Whether a reservation in this status occupies its time span.
    pub fn is_active(self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Confirmed)
    }
}

/// One reservation row as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub business_id: String,
    pub date: NaiveDate,
    /// Wall-clock start in the business timezone ("HH:MM" or "HH:MM:SS").
    pub time_start: String,
    /// Minutes the reservation occupies. `None` when the linked service,
    /// and with it the duration, could not be resolved.
    pub duration_minutes: Option<i64>,
    pub status: ReservationStatus,
}

/// Expand `reservations` into busy intervals, anchored in `tz`.
///
/// Each active reservation becomes one interval on its own date; output is
/// sorted ascending by start and NOT merged. A reservation without a usable
/// duration (missing, non-positive, or longer than a week) occupies a
/// zero-width interval at its start, which cannot block adjacent slots and
/// is almost never the intent, so every such row is logged. Rows with
/// unparseable start times are logged and skipped.
pub fn busy_intervals(tz: Tz, reservations: &[Reservation]) -> Vec<Interval> {
    let mut intervals: Vec<Interval> = Vec::new();
    for reservation in reservations.iter().filter(|r| r.status.is_active()) {
        let start = match grid::localize(reservation.date, &reservation.time_start, tz) {
            Ok(start) => start,
            Err(err) => {
                warn!(
                    business_id = %reservation.business_id,
                    date = %reservation.date,
                    time_start = %reservation.time_start,
                    error = %err,
                    "skipping reservation with unusable start time"
                );
                continue;
            }
        };
        let minutes = match reservation.duration_minutes {
            Some(minutes) if minutes > 0 && minutes <= grid::MAX_DURATION_MINUTES => minutes,
            unusable => {
                warn!(
                    business_id = %reservation.business_id,
                    date = %reservation.date,
                    time_start = %reservation.time_start,
                    duration_minutes = ?unusable,
                    "reservation duration unusable, occupying zero minutes"
                );
                0
            }
        };
        intervals.push(Interval {
            start,
            end: start + Duration::minutes(minutes),
        });
    }
    intervals.sort_by_key(|i| (i.start, i.end));
    intervals
}
