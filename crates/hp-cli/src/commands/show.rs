//! Show command for printing the hourly grid of a day.

use std::io::Write;

use anyhow::Result;

use hp_core::ics::format_date_key;
use hp_core::{Clock, HourRange, PlanStore, current_hour, hour_label};

use super::util::DateArgs;

pub fn run<W: Write, S: PlanStore>(
    writer: &mut W,
    store: &S,
    range: HourRange,
    args: &DateArgs,
    clock: &dyn Clock,
) -> Result<()> {
    let date = args.resolve(clock);
    let plan = store.load(date)?;
    let now_hour = current_hour(date, clock);

    writeln!(writer, "Hourly Planner: {}", format_date_key(date))?;
    match now_hour {
        Some(hour) => writeln!(writer, "Current hour: {}", hour_label(hour))?,
        None => writeln!(writer, "Not today (no live highlight)")?,
    }
    writeln!(writer)?;
    writeln!(writer, "  {:<8}  Task", "Time")?;

    for hour in range.hours() {
        let marker = if now_hour == Some(hour) { '>' } else { ' ' };
        let title = plan.get(&hour).map_or_else(String::new, |t| t.replace('\n', " / "));
        let line = format!("{marker} {:<8}  {title}", hour_label(hour));
        writeln!(writer, "{}", line.trim_end())?;
    }

    Ok(())
}
