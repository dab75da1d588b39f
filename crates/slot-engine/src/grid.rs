//! Time grid primitives: wall-clock localization, grid quantization, and
//! half-open intervals.
//!
//! Rules and reservations carry wall-clock strings ("09:00") that only become
//! comparable once anchored to the business timezone. This module owns that
//! anchoring plus the grid arithmetic the slot generator steps on.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Timelike};
use chrono_tz::Tz;

use crate::clock::Clock;
use crate::error::{EngineError, Result};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Longest duration, in minutes, the engine treats as usable (one week).
pub(crate) const MAX_DURATION_MINUTES: i64 = 7 * 24 * 60;

/// A half-open `[start, end)` span of timezone-anchored instants.
///
/// Zero-width spans (`start == end`) are legal; they arise from reservations
/// whose duration could not be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl Interval {
    /// True when the two spans share at least one instant.
    ///
    /// Half-open semantics: a span ending exactly when the other starts does
    /// NOT overlap it.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Anchor a wall-clock time string to `date` in `tz`.
///
/// Accepts `HH:MM` and `HH:MM:SS`. Ambiguous local times (DST fold) resolve
/// to the earlier instant.
///
/// # Errors
/// Returns `EngineError::InvalidTimeFormat` when `time` is not a readable
/// wall-clock string, and `EngineError::NonexistentLocalTime` when the time
/// falls inside a DST gap and names no instant on that date.
pub fn localize(date: NaiveDate, time: &str, tz: Tz) -> Result<DateTime<Tz>> {
    let parsed = parse_wall_clock(time)?;
    resolve_local(date, parsed, tz)
        .ok_or_else(|| EngineError::NonexistentLocalTime(format!("{time} on {date}")))
}

/// Round an instant up to the next multiple of `grid_minutes` since local
/// midnight. Instants already on the grid are unchanged; sub-minute
/// precision rounds up to the next whole minute first.
///
/// Total over DST transitions: an aligned wall clock that falls in a gap
/// advances by further grid steps until it names a real instant, and
/// alignment at or past 24:00 lands on the next day. In a fold the pass of
/// the repeated hour at or after `instant` is taken; the result never
/// precedes the input.
pub fn quantize_ceil(instant: DateTime<Tz>, grid_minutes: u32) -> DateTime<Tz> {
    let grid = grid_minutes.max(1);
    let time = instant.time();
    let mut minutes = time.hour() * 60 + time.minute();
    if time.second() > 0 || time.nanosecond() > 0 {
        minutes += 1;
    }
    let mut aligned = minutes.next_multiple_of(grid);

    let tz = instant.timezone();
    let base = instant.date_naive();
    loop {
        let date = base + Duration::days(i64::from(aligned / MINUTES_PER_DAY));
        let minute_of_day = aligned % MINUTES_PER_DAY;
        let resolved = NaiveTime::from_hms_opt(minute_of_day / 60, minute_of_day % 60, 0)
            .and_then(|t| resolve_at_or_after(date, t, tz, instant));
        match resolved {
            Some(dt) => return dt,
            None => aligned += grid,
        }
    }
}

/// The current instant in the business timezone.
pub fn now_in(clock: &dyn Clock, tz: Tz) -> DateTime<Tz> {
    clock.now_utc().with_timezone(&tz)
}

/// Business-local `HH:MM` label for an instant.
pub fn slot_label(instant: DateTime<Tz>) -> String {
    instant.format("%H:%M").to_string()
}

/// Parse `HH:MM` or `HH:MM:SS` into a `NaiveTime`.
fn parse_wall_clock(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| EngineError::InvalidTimeFormat(s.to_string()))
}

/// Resolve a naive local time on `date` in `tz`, taking the earlier instant
/// when the wall clock is ambiguous (DST fold). `None` inside a DST gap.
fn resolve_local(date: NaiveDate, time: NaiveTime, tz: Tz) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&date.and_time(time)) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earlier, _) => Some(earlier),
        LocalResult::None => None,
    }
}

/// Resolve an aligned wall time on `date` in `tz`, picking the pass of a
/// DST fold that does not precede `floor`. `None` inside a DST gap.
fn resolve_at_or_after(
    date: NaiveDate,
    time: NaiveTime,
    tz: Tz,
    floor: DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&date.and_time(time)) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earlier, later) => {
            Some(if earlier >= floor { earlier } else { later })
        }
        LocalResult::None => None,
    }
}
