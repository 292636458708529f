//! Implementation of the `hp export` command.
//!
//! Builds the iCalendar document for one day and hands it to a [`Delivery`],
//! either a file in the output directory or stdout.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use hp_core::ics::ICS_MIME_TYPE;
use hp_core::{Clock, HourRange, PlanStore, build_day_document, entries_for_export, export_filename};

use super::util::DateArgs;
use crate::delivery::Delivery;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub date: DateArgs,

    /// Directory to write the .ics file into (overrides `output_dir`).
    #[arg(short, long, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Write the calendar to stdout instead of a file.
    #[arg(long)]
    pub stdout: bool,
}

/// Run the export command.
///
/// Every hour row of the grid is passed to the builder; rows without a task
/// are filtered out there. A one-line summary goes to `writer`.
pub fn run<W: Write, S: PlanStore>(
    writer: &mut W,
    delivery: &mut dyn Delivery,
    store: &S,
    range: HourRange,
    file_prefix: &str,
    args: &DateArgs,
    clock: &dyn Clock,
) -> Result<()> {
    let date = args.resolve(clock);
    let plan = store.load(date)?;
    let entries = entries_for_export(range, &plan);
    let event_count = entries.iter().filter(|entry| !entry.is_blank()).count();

    let text = build_day_document(date, &entries, clock);
    let filename = export_filename(file_prefix, date);
    delivery.deliver(&filename, &text, ICS_MIME_TYPE)?;

    tracing::info!(%date, events = event_count, filename, "exported day");
    writeln!(
        writer,
        "Exported {event_count} {} for {date} to {}",
        if event_count == 1 { "event" } else { "events" },
        delivery.destination(&filename)
    )?;
    Ok(())
}
