//! Status command for listing saved days.

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use hp_core::{PlanStore, is_blank_title};
use hp_store::Database;

pub fn run<W: Write>(writer: &mut W, db: &Database, database_path: &Path) -> Result<()> {
    let dates = db.list_dates()?;

    writeln!(writer, "Hourly planner status")?;
    writeln!(writer, "Database: {}", database_path.display())?;

    if dates.is_empty() {
        writeln!(writer, "No saved days.")?;
        return Ok(());
    }

    writeln!(writer, "Saved days:")?;
    for date in dates {
        let plan = db.load(date)?;
        let tasks = plan.values().filter(|title| !is_blank_title(title)).count();
        writeln!(
            writer,
            "- {date}: {tasks} {}",
            if tasks == 1 { "task" } else { "tasks" }
        )?;
    }

    Ok(())
}
