//! Availability rules and their expansion into open intervals.
//!
//! A business declares when it is open through rules that are either weekly
//! recurring (every Monday) or bound to an inclusive date range (a trade
//! fair week, a holiday closure's complement). For a given date the
//! applicable rules are localized to half-open instant intervals; these are
//! the windows the slot generator walks.

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EngineError, Result};
use crate::grid::{self, Interval};

/// When an availability rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RulePeriod {
    /// Applies every week on the given weekday.
    Weekly { day: chrono::Weekday },
    /// Applies on every date of the inclusive range.
    DateRange { from: NaiveDate, to: NaiveDate },
}

/// One availability rule as stored.
///
/// `time_start` and `time_end` are wall-clock strings ("HH:MM" or
/// "HH:MM:SS") in the business timezone, with `time_start < time_end` as a
/// store invariant. Rows violating it, or carrying unparseable times, are
/// skipped at resolution time rather than failing the whole day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityRule {
    pub business_id: String,
    pub period: RulePeriod,
    pub time_start: String,
    pub time_end: String,
}

impl AvailabilityRule {
    /// True when this rule contributes availability on `date`.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        match self.period {
            RulePeriod::Weekly { day } => date.weekday() == day,
            RulePeriod::DateRange { from, to } => from <= date && date <= to,
        }
    }
}

/// Expand `rules` into the open intervals of `date`, anchored in `tz`.
///
/// Output is sorted ascending by start and deliberately NOT merged:
/// overlapping rules each keep their interval, and their union is realized
/// by the slot generator's per-interval walk plus label dedup.
///
/// A date with no applicable rules yields an empty vector. Rules with
/// malformed wall-clock strings, inverted ranges, or an endpoint inside a
/// DST gap contribute nothing; each skip is logged.
pub fn open_intervals(date: NaiveDate, tz: Tz, rules: &[AvailabilityRule]) -> Vec<Interval> {
    let mut intervals: Vec<Interval> = Vec::new();
    for rule in rules.iter().filter(|r| r.applies_on(date)) {
        match rule_interval(rule, date, tz) {
            Ok(interval) => intervals.push(interval),
            Err(err) => {
                warn!(
                    business_id = %rule.business_id,
                    %date,
                    time_start = %rule.time_start,
                    time_end = %rule.time_end,
                    error = %err,
                    "skipping unusable availability rule"
                );
            }
        }
    }
    intervals.sort_by_key(|i| (i.start, i.end));
    intervals
}

/// Localize one applicable rule to a half-open interval on `date`.
fn rule_interval(rule: &AvailabilityRule, date: NaiveDate, tz: Tz) -> Result<Interval> {
    let start = grid::localize(date, &rule.time_start, tz)?;
    let end = grid::localize(date, &rule.time_end, tz)?;
    if start >= end {
        return Err(EngineError::InvalidTimeRange(format!(
            "{} does not precede {}",
            rule.time_start, rule.time_end
        )));
    }
    Ok(Interval { start, end })
}
