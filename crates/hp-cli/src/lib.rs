//! Hourly planner CLI library.
//!
//! This crate provides the CLI interface for the hourly planner.

mod cli;
pub mod commands;
mod config;
pub mod delivery;

pub use cli::{Cli, Commands};
pub use config::Config;
