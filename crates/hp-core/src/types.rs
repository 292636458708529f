//! Core type definitions.

use std::collections::BTreeMap;

use thiserror::Error;

/// Validation errors for planner settings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// An hour outside `0..=23`.
    #[error("hour must be between 0 and 23, got {hour}")]
    HourOutOfRange { hour: u32 },

    /// The first planner hour comes after the last one.
    #[error("start hour {start} is after end hour {end}")]
    InvertedHourRange { start: u32, end: u32 },
}

/// A user's label for one hour slot.
///
/// The hour is not validated: the document builder computes times from
/// whatever it is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    pub hour: u32,
    pub title: String,
}

impl TaskEntry {
    pub fn new(hour: u32, title: impl Into<String>) -> Self {
        Self {
            hour,
            title: title.into(),
        }
    }

    /// True when the title is empty after trimming whitespace.
    pub fn is_blank(&self) -> bool {
        is_blank_title(&self.title)
    }
}

/// All planned slots of one day, keyed by hour.
pub type DayPlan = BTreeMap<u32, String>;

/// True when `title` holds nothing but whitespace.
///
/// Whitespace follows the ECMAScript `trim` set the web planner used: Unicode
/// `White_Space` plus U+FEFF, without U+0085.
pub fn is_blank_title(title: &str) -> bool {
    title.chars().all(is_trimmed_whitespace)
}

fn is_trimmed_whitespace(c: char) -> bool {
    match c {
        '\u{FEFF}' => true,
        '\u{85}' => false,
        _ => c.is_whitespace(),
    }
}
