//! Per-date persistence interface.
//!
//! The document builder never touches a store; callers resolve a [`DayPlan`]
//! first and hand the entries over.

use chrono::NaiveDate;

use crate::ics::format_date_key;
use crate::types::DayPlan;

/// Prefix of every storage key.
pub const STORAGE_KEY_PREFIX: &str = "hourly-planner";

/// Returns the storage key for a date, e.g. `hourly-planner:2024-03-15`.
pub fn storage_key(date: NaiveDate) -> String {
    format!("{STORAGE_KEY_PREFIX}:{}", format_date_key(date))
}

/// Loads and saves day plans by date.
pub trait PlanStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the plan for `date`, or an empty plan if none was saved.
    fn load(&self, date: NaiveDate) -> Result<DayPlan, Self::Error>;

    /// Replaces the plan stored for `date`.
    fn save(&mut self, date: NaiveDate, plan: &DayPlan) -> Result<(), Self::Error>;
}
