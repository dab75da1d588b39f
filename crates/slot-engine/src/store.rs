//! Read contract for rules and reservations.
//!
//! The engine reads two collections and nothing else. Implementations wrap
//! whatever persistence the application uses and map transport failures to
//! [`EngineError::StoreUnavailable`]; the engine never retries, it hands the
//! error straight back to the caller.
//!
//! [`EngineError::StoreUnavailable`]: crate::error::EngineError::StoreUnavailable

use chrono::NaiveDate;

use crate::error::Result;
use crate::occupancy::Reservation;
use crate::rules::AvailabilityRule;

/// Read access to the booking store.
pub trait AvailabilityStore {
    /// All availability rules of a business, weekly and date-bound alike.
    ///
    /// # Errors
    /// `EngineError::StoreUnavailable` when the backing store cannot be read.
    fn availability_rules(&self, business_id: &str) -> Result<Vec<AvailabilityRule>>;

    /// The reservations occupying `date` for a business.
    ///
    /// Implementations return pending and confirmed reservations only. The
    /// occupancy pass still drops inactive rows should an implementation
    /// forget the filter.
    ///
    /// # Errors
    /// `EngineError::StoreUnavailable` when the backing store cannot be read.
    fn active_reservations(&self, business_id: &str, date: NaiveDate) -> Result<Vec<Reservation>>;
}

/// Vec-backed store for tests and in-process embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    pub rules: Vec<AvailabilityRule>,
    pub reservations: Vec<Reservation>,
}

impl AvailabilityStore for InMemoryStore {
    fn availability_rules(&self, business_id: &str) -> Result<Vec<AvailabilityRule>> {
        Ok(self
            .rules
            .iter()
            .filter(|r| r.business_id == business_id)
            .cloned()
            .collect())
    }

    fn active_reservations(&self, business_id: &str, date: NaiveDate) -> Result<Vec<Reservation>> {
        Ok(self
            .reservations
            .iter()
            .filter(|r| r.business_id == business_id && r.date == date && r.status.is_active())
            .cloned()
            .collect())
    }
}
