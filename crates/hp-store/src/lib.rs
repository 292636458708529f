//! Storage layer for the hourly planner.
//!
//! Persists one [`DayPlan`] per date using `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` can be moved between threads but not shared without external
//! synchronization.
//!
//! # Schema
//!
//! Each row of `day_plans` holds a whole day:
//! - `key`: the storage key, `hourly-planner:<YYYY-MM-DD>`
//! - `tasks`: JSON object mapping hour to title, e.g. `{"9":"Standup"}`
//! - `updated_at`: RFC 3339 UTC timestamp of the last save
//!
//! A row whose `tasks` payload cannot be parsed loads as an empty day.

use std::path::Path;

use chrono::{NaiveDate, SecondsFormat, Utc};
use hp_core::store::STORAGE_KEY_PREFIX;
use hp_core::{DayPlan, PlanStore, storage_key};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

/// Database errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Failed to serialize a day plan.
    #[error("failed to encode tasks for {date}: {source}")]
    Encode {
        date: NaiveDate,
        #[source]
        source: serde_json::Error,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS day_plans (
                key TEXT PRIMARY KEY,
                tasks TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Returns the dates that have a saved plan, oldest first.
    ///
    /// Rows with keys outside the `hourly-planner:` scheme are skipped.
    pub fn list_dates(&self) -> Result<Vec<NaiveDate>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM day_plans ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(keys.iter().filter_map(|key| parse_storage_key(key)).collect())
    }

    /// Returns the raw JSON payload stored for a date.
    fn tasks_json(&self, date: NaiveDate) -> Result<Option<String>, StoreError> {
        let json = self
            .conn
            .query_row(
                "SELECT tasks FROM day_plans WHERE key = ?",
                params![storage_key(date)],
                |row| row.get(0),
            )
            .optional()?;
        Ok(json)
    }
}

impl PlanStore for Database {
    type Error = StoreError;

    fn load(&self, date: NaiveDate) -> Result<DayPlan, StoreError> {
        let Some(json) = self.tasks_json(date)? else {
            tracing::debug!(%date, "no saved plan");
            return Ok(DayPlan::new());
        };

        match serde_json::from_str::<DayPlan>(&json) {
            Ok(plan) => {
                tracing::debug!(%date, slots = plan.len(), "loaded plan");
                Ok(plan)
            }
            Err(e) => {
                tracing::warn!(
                    %date,
                    error = %e,
                    "corrupted plan data, starting with an empty day"
                );
                Ok(DayPlan::new())
            }
        }
    }

    fn save(&mut self, date: NaiveDate, plan: &DayPlan) -> Result<(), StoreError> {
        let json =
            serde_json::to_string(plan).map_err(|source| StoreError::Encode { date, source })?;
        let updated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        self.conn.execute(
            "
            INSERT INTO day_plans (key, tasks, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                tasks = excluded.tasks,
                updated_at = excluded.updated_at
            ",
            params![storage_key(date), json, updated_at],
        )?;

        tracing::debug!(%date, slots = plan.len(), "saved plan");
        Ok(())
    }
}

/// Parses `hourly-planner:<YYYY-MM-DD>` back into a date.
fn parse_storage_key(key: &str) -> Option<NaiveDate> {
    let date = key
        .strip_prefix(STORAGE_KEY_PREFIX)?
        .strip_prefix(':')?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}
