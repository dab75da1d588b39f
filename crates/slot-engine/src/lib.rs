//! # slot-engine
//!
//! Deterministic booking-slot computation with timezone and DST handling.
//!
//! Given a business's availability rules and its active reservations, the
//! engine computes which start times of a requested length remain bookable
//! on a date. Wall clock in, wall clock out: rules and reservations carry
//! "HH:MM" strings in the business timezone, the result is a sorted,
//! deduplicated list of "HH:MM" labels, and every comparison in between
//! happens on timezone-anchored instants via `chrono-tz`.
//!
//! ## Modules
//!
//! - [`grid`] - wall-clock localization, grid quantization, half-open intervals
//! - [`rules`] - availability rules and their expansion into open intervals
//! - [`occupancy`] - busy intervals from pending and confirmed reservations
//! - [`slots`] - candidate walk producing the bookable slot labels
//! - [`store`] - read contract for rules and reservations
//! - [`clock`] - injected time source
//! - [`error`] - error types

pub mod clock;
pub mod error;
pub mod grid;
pub mod occupancy;
pub mod rules;
pub mod slots;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{EngineError, Result};
pub use grid::{localize, now_in, quantize_ceil, slot_label, Interval};
pub use occupancy::{busy_intervals, Reservation, ReservationStatus};
pub use rules::{open_intervals, AvailabilityRule, RulePeriod};
pub use slots::{compute_slots, day_slots, is_blocked, SlotPolicy};
pub use store::{AvailabilityStore, InMemoryStore};
