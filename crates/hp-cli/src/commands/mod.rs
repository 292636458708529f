//! CLI subcommand implementations.

pub mod clear;
pub mod export;
pub mod set;
pub mod show;
pub mod status;
pub mod util;
