//! Shared utilities for CLI commands.

use chrono::NaiveDate;
use clap::Args;

use hp_core::Clock;

/// Selects the day a command operates on.
#[derive(Debug, Clone, Default, Args)]
pub struct DateArgs {
    /// Day to use, as YYYY-MM-DD (defaults to today).
    #[arg(short, long)]
    pub date: Option<NaiveDate>,
}

impl DateArgs {
    /// The requested date, or the clock's local today.
    pub fn resolve(&self, clock: &dyn Clock) -> NaiveDate {
        self.date.unwrap_or_else(|| clock.today())
    }
}
