//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use hp_core::planner::{DEFAULT_END_HOUR, DEFAULT_START_HOUR};
use hp_core::{HourRange, ValidationError};
use serde::{Deserialize, Serialize};

/// File name prefix used by the original web planner's exports.
pub const DEFAULT_FILE_PREFIX: &str = "MySchedule";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,
    /// Directory exported `.ics` files are written to.
    pub output_dir: PathBuf,
    /// Prefix of exported file names (`<prefix>-<YYYY-MM-DD>.ics`).
    pub file_prefix: String,
    /// First hour row of the planner grid.
    pub start_hour: u32,
    /// Last hour row of the planner grid (inclusive).
    pub end_hour: u32,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("planner.db"),
            output_dir: PathBuf::from("."),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            start_hour: DEFAULT_START_HOUR,
            end_hour: DEFAULT_END_HOUR,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Later sources win: defaults, `<config_dir>/hp/config.toml`, the given
    /// file, then `HP_*` environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("HP_"));

        figment.extract()
    }

    /// The validated hour rows of the planner grid.
    pub fn hour_range(&self) -> Result<HourRange, ValidationError> {
        HourRange::new(self.start_hour, self.end_hour)
    }
}

/// Returns the platform-specific config directory for hp.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hp"))
}

/// Returns the platform-specific data directory for hp.
///
/// On Linux: `~/.local/share/hp`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("hp"))
}
