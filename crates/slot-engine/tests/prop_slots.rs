//! Property-based tests for the slot generator.
//!
//! These verify invariants that must hold for *any* layout of open windows
//! and bookings, not just the worked examples in `slots_tests.rs`. Inputs
//! live on one DST-free Monday (2026-03-02, Europe/Rome) in minute-of-day
//! space so expectations can be checked with plain integer arithmetic.

use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::Europe::Rome;
use chrono_tz::Tz;
use proptest::prelude::*;
use slot_engine::{day_slots, Interval, SlotPolicy};

// ---------------------------------------------------------------------------
// Strategies: windows and bookings in quarter-hour units
// ---------------------------------------------------------------------------

/// Open windows between 06:00 and 22:00, aligned to the quarter hour.
fn arb_windows() -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec(
        (24u32..=72, 1u32..=16).prop_map(|(start_q, len_q)| (start_q * 15, (start_q + len_q) * 15)),
        1..=3,
    )
}

/// Busy spans, quarter-aligned, zero-width allowed.
fn arb_busy() -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec(
        (24u32..=80, 0u32..=8).prop_map(|(start_q, len_q)| (start_q * 15, (start_q + len_q) * 15)),
        0..=4,
    )
}

fn arb_duration() -> impl Strategy<Value = i64> {
    prop_oneof![Just(15i64), Just(30), Just(45), Just(60), Just(90)]
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The scenario Monday.
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

/// Rome-anchored instant at a minute of the scenario Monday.
fn at(minute: u32) -> DateTime<Tz> {
    Rome.with_ymd_and_hms(2026, 3, 2, minute / 60, minute % 60, 0)
        .unwrap()
}

fn intervals(pairs: &[(u32, u32)]) -> Vec<Interval> {
    pairs
        .iter()
        .map(|&(start, end)| Interval {
            start: at(start),
            end: at(end),
        })
        .collect()
}

/// An instant the day before, so the Monday is not "today".
fn day_before() -> DateTime<Tz> {
    Rome.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

/// Parse an "HH:MM" label back to its minute of the day.
fn label_minutes(label: &str) -> u32 {
    let (h, m) = label.split_once(':').expect("label is HH:MM");
    h.parse::<u32>().expect("hour") * 60 + m.parse::<u32>().expect("minute")
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: Every slot fits inside some open window
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_fit_inside_an_open_window(
        windows in arb_windows(),
        busy in arb_busy(),
        dur in arb_duration(),
    ) {
        let slots = day_slots(
            monday(),
            dur,
            &intervals(&windows),
            &intervals(&busy),
            day_before(),
            SlotPolicy::default(),
        );

        for label in &slots {
            let m = label_minutes(label);
            prop_assert!(
                windows.iter().any(|&(ws, we)| ws <= m && m + dur as u32 <= we),
                "slot {} (+{} min) fits no window {:?}",
                label,
                dur,
                windows
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: No slot overlaps a busy span (touching is legal)
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_never_overlap_busy_spans(
        windows in arb_windows(),
        busy in arb_busy(),
        dur in arb_duration(),
    ) {
        let slots = day_slots(
            monday(),
            dur,
            &intervals(&windows),
            &intervals(&busy),
            day_before(),
            SlotPolicy::default(),
        );

        for label in &slots {
            let start = label_minutes(label);
            let end = start + dur as u32;
            for &(bs, be) in &busy {
                prop_assert!(
                    !(start < be && end > bs),
                    "slot {}..{} overlaps booking {}..{}",
                    start,
                    end,
                    bs,
                    be
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Output is strictly ascending, hence deduplicated
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn output_is_strictly_ascending(
        windows in arb_windows(),
        busy in arb_busy(),
        dur in arb_duration(),
    ) {
        let slots = day_slots(
            monday(),
            dur,
            &intervals(&windows),
            &intervals(&busy),
            day_before(),
            SlotPolicy::default(),
        );

        for pair in slots.windows(2) {
            prop_assert!(
                label_minutes(&pair[0]) < label_minutes(&pair[1]),
                "{} does not precede {}",
                pair[0],
                pair[1]
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: Quarter-aligned windows produce quarter-aligned slots
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn aligned_windows_produce_aligned_slots(
        windows in arb_windows(),
        busy in arb_busy(),
        dur in arb_duration(),
    ) {
        let slots = day_slots(
            monday(),
            dur,
            &intervals(&windows),
            &intervals(&busy),
            day_before(),
            SlotPolicy::default(),
        );

        for label in &slots {
            prop_assert_eq!(label_minutes(label) % 15, 0, "{} is off-grid", label);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: Today, nothing is offered before the lead-time cutoff
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn no_slot_precedes_todays_cutoff(
        windows in arb_windows(),
        dur in arb_duration(),
        now_min in 360u32..=1320,
    ) {
        let slots = day_slots(
            monday(),
            dur,
            &intervals(&windows),
            &[],
            at(now_min),
            SlotPolicy::default(),
        );

        // quantize_ceil(now + 15 min) on a 15-minute grid.
        let cutoff = (now_min + 15).next_multiple_of(15);
        for label in &slots {
            prop_assert!(
                label_minutes(label) >= cutoff,
                "slot {} offered before the {} cutoff (now {})",
                label,
                cutoff,
                now_min
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: On any other day the clock is irrelevant
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn other_days_ignore_the_clock(
        windows in arb_windows(),
        busy in arb_busy(),
        dur in arb_duration(),
    ) {
        let open = intervals(&windows);
        let occupied = intervals(&busy);

        let sunday_noon = day_slots(
            monday(),
            dur,
            &open,
            &occupied,
            day_before(),
            SlotPolicy::default(),
        );
        let saturday_morning = day_slots(
            monday(),
            dur,
            &open,
            &occupied,
            Rome.with_ymd_and_hms(2026, 2, 28, 8, 0, 0).unwrap(),
            SlotPolicy::default(),
        );

        prop_assert_eq!(sunday_noon, saturday_morning);
    }
}

// ---------------------------------------------------------------------------
// Property 7: Unaligned inputs never panic and still emit readable labels
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn unaligned_inputs_never_panic(
        window_start in 0u32..=1380,
        window_len in 1u32..=59,
        busy_start in 0u32..=1380,
        busy_len in 0u32..=59,
        dur in 1i64..=180,
    ) {
        let open = intervals(&[(window_start, window_start + window_len)]);
        let occupied = intervals(&[(busy_start, busy_start + busy_len)]);

        let slots = day_slots(monday(), dur, &open, &occupied, day_before(), SlotPolicy::default());

        for label in &slots {
            prop_assert!(label_minutes(label) < 24 * 60);
        }
    }
}
