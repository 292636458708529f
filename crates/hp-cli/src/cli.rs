//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::export::ExportArgs;
use crate::commands::set::SetArgs;
use crate::commands::util::DateArgs;

/// Hourly day planner.
///
/// Assign tasks to the hours of a day, then export the day as an `.ics` file
/// for Apple or Google Calendar.
#[derive(Debug, Parser)]
#[command(name = "hp", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the hourly grid for a day.
    Show(DateArgs),

    /// Set the task for one hour.
    Set(SetArgs),

    /// Remove every task from a day.
    Clear(DateArgs),

    /// Export a day as an iCalendar file.
    Export(ExportArgs),

    /// Show the database location and the days with saved plans.
    Status,
}
