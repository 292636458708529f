//! Clear command for emptying a day.

use std::io::Write;

use anyhow::Result;

use hp_core::{Clock, DayPlan, PlanStore};

use super::util::DateArgs;

pub fn run<W: Write, S: PlanStore>(
    writer: &mut W,
    store: &mut S,
    args: &DateArgs,
    clock: &dyn Clock,
) -> Result<()> {
    let date = args.resolve(clock);
    store.save(date, &DayPlan::new())?;
    writeln!(writer, "Cleared all tasks on {date}")?;
    Ok(())
}
