//! The hourly grid shown for a day.

use std::ops::RangeInclusive;

use chrono::{NaiveDate, Timelike};

use crate::clock::Clock;
use crate::types::{DayPlan, TaskEntry, ValidationError};

/// First hour row shown by default (8 AM).
pub const DEFAULT_START_HOUR: u32 = 8;

/// Last hour row shown by default (8 PM).
pub const DEFAULT_END_HOUR: u32 = 20;

/// Inclusive range of hour rows in the planner grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourRange {
    start: u32,
    end: u32,
}

impl HourRange {
    pub fn new(start: u32, end: u32) -> Result<Self, ValidationError> {
        for hour in [start, end] {
            if hour > 23 {
                return Err(ValidationError::HourOutOfRange { hour });
            }
        }
        if start > end {
            return Err(ValidationError::InvertedHourRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> u32 {
        self.start
    }

    pub const fn end(&self) -> u32 {
        self.end
    }

    /// The hour rows, in ascending order.
    pub const fn hours(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    pub const fn contains(&self, hour: u32) -> bool {
        hour >= self.start && hour <= self.end
    }
}

impl Default for HourRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_HOUR,
            end: DEFAULT_END_HOUR,
        }
    }
}

/// Formats an hour as a 12-hour clock label, e.g. `9:00 AM` or `12:00 PM`.
pub fn hour_label(hour: u32) -> String {
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display}:00 {suffix}")
}

/// Stores `title` in the slot for `hour`, replacing any previous title.
pub fn set_task(plan: &mut DayPlan, hour: u32, title: impl Into<String>) {
    plan.insert(hour, title.into());
}

/// One entry per hour row, in row order.
///
/// Rows without a saved title get an empty one; the document builder drops
/// them.
pub fn entries_for_export(range: HourRange, plan: &DayPlan) -> Vec<TaskEntry> {
    range
        .hours()
        .map(|hour| TaskEntry::new(hour, plan.get(&hour).cloned().unwrap_or_default()))
        .collect()
}

/// The hour to highlight, if `date` is the clock's current day.
pub fn current_hour(date: NaiveDate, clock: &dyn Clock) -> Option<u32> {
    let now = clock.now();
    (now.date() == date).then_some(now.hour())
}
