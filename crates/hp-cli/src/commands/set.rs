//! Set command for assigning a task to one hour.

use std::io::Write;

use anyhow::{Result, bail};
use clap::Args;

use hp_core::{Clock, HourRange, PlanStore, hour_label, is_blank_title, set_task};

use super::util::DateArgs;

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Hour of the slot, 0-23.
    pub hour: u32,

    /// Task text; several words are joined with spaces. Omit to empty the slot.
    pub words: Vec<String>,

    #[command(flatten)]
    pub date: DateArgs,
}

impl SetArgs {
    /// The task title as typed.
    pub fn title(&self) -> String {
        self.words.join(" ")
    }
}

pub fn run<W: Write, S: PlanStore>(
    writer: &mut W,
    store: &mut S,
    range: HourRange,
    args: &SetArgs,
    clock: &dyn Clock,
) -> Result<()> {
    if !range.contains(args.hour) {
        bail!(
            "hour {} is outside the planner range {}-{}",
            args.hour,
            range.start(),
            range.end()
        );
    }

    let date = args.date.resolve(clock);
    let title = args.title();

    let mut plan = store.load(date)?;
    set_task(&mut plan, args.hour, title.as_str());
    store.save(date, &plan)?;

    if is_blank_title(&title) {
        writeln!(writer, "Cleared {} on {date}", hour_label(args.hour))?;
    } else {
        writeln!(writer, "{} on {date}: {title}", hour_label(args.hour))?;
    }
    Ok(())
}
