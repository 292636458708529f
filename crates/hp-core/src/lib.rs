//! Core domain logic for the hourly planner.
//!
//! This crate contains the fundamental types and logic for:
//! - iCalendar export: timestamp formatting, TEXT escaping and the day document
//! - The planner grid: hour rows, labels and the current-hour highlight
//! - The clock and storage interfaces the CLI plugs into

pub mod clock;
pub mod ics;
pub mod planner;
pub mod store;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use ics::{build_day_document, export_filename};
pub use planner::{HourRange, current_hour, entries_for_export, hour_label, set_task};
pub use store::{PlanStore, storage_key};
pub use types::{DayPlan, TaskEntry, ValidationError, is_blank_title};
