//! Builds the VCALENDAR document for one planned day.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use super::format::{escape_text, format_date_key, format_local_timestamp};
use crate::clock::Clock;
use crate::types::TaskEntry;

/// Product identifier emitted in the calendar header.
pub const PRODID: &str = "-//Hourly Planner//EN";

/// Domain part of every event UID.
pub const UID_DOMAIN: &str = "hourly-planner";

/// MIME type of exported documents.
pub const ICS_MIME_TYPE: &str = "text/calendar; charset=utf-8";

/// File extension of exported documents.
pub const ICS_EXTENSION: &str = "ics";

/// Line terminator required by RFC 5545.
const CRLF: &str = "\r\n";

/// One VEVENT derived from a non-blank [`TaskEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub uid: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Already escaped for output.
    pub summary: String,
}

impl CalendarEvent {
    /// Renders the `BEGIN:VEVENT` .. `END:VEVENT` block as individual lines.
    pub fn to_lines(&self, dtstamp: &str) -> Vec<String> {
        vec![
            "BEGIN:VEVENT".to_string(),
            format!("UID:{}", self.uid),
            format!("DTSTAMP:{dtstamp}"),
            format!("DTSTART:{}", format_local_timestamp(self.start)),
            format!("DTEND:{}", format_local_timestamp(self.end)),
            format!("SUMMARY:{}", self.summary),
            "END:VEVENT".to_string(),
        ]
    }
}

/// Derives calendar events from the entries of one day.
///
/// Blank titles are dropped and the survivors keep their relative order. The
/// position used in each UID is the index among the survivors, so two entries
/// sharing an hour still get distinct UIDs.
pub fn calendar_events(date: NaiveDate, entries: &[TaskEntry]) -> Vec<CalendarEvent> {
    let midnight = date.and_time(NaiveTime::MIN);
    let date_key = format_date_key(date);

    entries
        .iter()
        .filter(|entry| !entry.is_blank())
        .enumerate()
        .map(|(idx, entry)| {
            // Hours past 23 roll into the following day, like a plain hour
            // increment on a date-time.
            let start = add_hours(midnight, i64::from(entry.hour));
            let end = add_hours(start, 1);
            CalendarEvent {
                uid: format!("{date_key}-{}-{idx}@{UID_DOMAIN}", entry.hour),
                start,
                end,
                summary: escape_text(&entry.title),
            }
        })
        .collect()
}

/// Builds the complete iCalendar document for `date`.
///
/// The clock is read exactly once, for the `DTSTAMP` shared by all events.
/// Lines are joined with CRLF and the document has no trailing terminator.
/// With no events the body is a single empty line between header and footer.
pub fn build_day_document(date: NaiveDate, entries: &[TaskEntry], clock: &dyn Clock) -> String {
    let dtstamp = format_local_timestamp(clock.now());
    let events = calendar_events(date, entries);

    tracing::debug!(
        date = %date,
        entries = entries.len(),
        events = events.len(),
        "building calendar document"
    );

    let body = events
        .iter()
        .map(|event| event.to_lines(&dtstamp).join(CRLF))
        .collect::<Vec<_>>()
        .join(CRLF);

    [
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{PRODID}"),
        "CALSCALE:GREGORIAN".to_string(),
        body,
        "END:VCALENDAR".to_string(),
    ]
    .join(CRLF)
}

/// File name for an exported day: `<prefix>-<YYYY-MM-DD>.ics`.
pub fn export_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}-{}.{ICS_EXTENSION}", format_date_key(date))
}

/// Adds whole hours, saturating at the end of the representable range.
fn add_hours(base: NaiveDateTime, hours: i64) -> NaiveDateTime {
    TimeDelta::try_hours(hours)
        .and_then(|delta| base.checked_add_signed(delta))
        .unwrap_or(NaiveDateTime::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::ics::format::unescape_text;

    use std::cell::Cell;

    use insta::assert_snapshot;

    /// Clock that moves forward one second on every read.
    struct TickingClock {
        next: Cell<NaiveDateTime>,
        reads: Cell<usize>,
    }

    impl TickingClock {
        fn starting_at(moment: NaiveDateTime) -> Self {
            Self {
                next: Cell::new(moment),
                reads: Cell::new(0),
            }
        }
    }

    impl Clock for TickingClock {
        fn now(&self) -> NaiveDateTime {
            let moment = self.next.get();
            self.next.set(moment + TimeDelta::seconds(1));
            self.reads.set(self.reads.get() + 1);
            moment
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock(date(2024, 3, 14).and_hms_opt(18, 30, 5).unwrap())
    }

    fn lines_with_prefix<'a>(doc: &'a str, prefix: &str) -> Vec<&'a str> {
        doc.split("\r\n")
            .filter(|line| line.starts_with(prefix))
            .collect()
    }

    #[test]
    fn document_with_events() {
        let entries = vec![
            TaskEntry::new(8, ""),
            TaskEntry::new(9, "Standup"),
            TaskEntry::new(10, "   "),
            TaskEntry::new(13, "Meeting, boss; notes\nfollow-up"),
        ];

        let doc = build_day_document(date(2024, 3, 15), &entries, &clock());

        assert_snapshot!(doc.replace("\r\n", "\n"), @r"
        BEGIN:VCALENDAR
        VERSION:2.0
        PRODID:-//Hourly Planner//EN
        CALSCALE:GREGORIAN
        BEGIN:VEVENT
        UID:2024-03-15-9-0@hourly-planner
        DTSTAMP:20240314T183005
        DTSTART:20240315T090000
        DTEND:20240315T100000
        SUMMARY:Standup
        END:VEVENT
        BEGIN:VEVENT
        UID:2024-03-15-13-1@hourly-planner
        DTSTAMP:20240314T183005
        DTSTART:20240315T130000
        DTEND:20240315T140000
        SUMMARY:Meeting\, boss\; notes\nfollow-up
        END:VEVENT
        END:VCALENDAR
        ");
    }

    #[test]
    fn lines_are_crlf_terminated_without_trailing_terminator() {
        let doc = build_day_document(date(2024, 3, 15), &[TaskEntry::new(9, "a")], &clock());

        assert!(doc.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(doc.ends_with("\r\nEND:VCALENDAR"));
        assert!(!doc.ends_with("\r\n"));
        assert_eq!(doc.matches('\n').count(), doc.matches("\r\n").count());
    }

    #[test]
    fn empty_document_has_header_and_footer_only() {
        let expected = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Hourly Planner//EN\r\n\
                        CALSCALE:GREGORIAN\r\n\r\nEND:VCALENDAR";

        assert_eq!(build_day_document(date(2024, 3, 15), &[], &clock()), expected);

        let blanks = vec![TaskEntry::new(8, ""), TaskEntry::new(9, " \t ")];
        assert_eq!(
            build_day_document(date(2024, 3, 15), &blanks, &clock()),
            expected
        );
    }

    #[test]
    fn event_blocks_are_balanced() {
        let entries: Vec<_> = (0..24)
            .map(|hour| TaskEntry::new(hour, if hour % 3 == 0 { "" } else { "task" }))
            .collect();
        let doc = build_day_document(date(2024, 3, 15), &entries, &clock());

        assert_eq!(lines_with_prefix(&doc, "BEGIN:VEVENT").len(), 16);
        assert_eq!(lines_with_prefix(&doc, "END:VEVENT").len(), 16);

        let mut depth = 0_i32;
        for line in doc.split("\r\n") {
            match line {
                "BEGIN:VEVENT" => depth += 1,
                "END:VEVENT" => depth -= 1,
                _ => {}
            }
            assert!((0..=1).contains(&depth));
        }
        assert_eq!(depth, 0);
    }

    #[test]
    fn start_and_end_are_one_hour_apart() {
        let events = calendar_events(date(2024, 3, 15), &[TaskEntry::new(9, "Focus")]);

        assert_eq!(events.len(), 1);
        assert_eq!(format_local_timestamp(events[0].start), "20240315T090000");
        assert_eq!(format_local_timestamp(events[0].end), "20240315T100000");
    }

    #[test]
    fn last_hour_of_day_ends_on_next_day() {
        let events = calendar_events(date(2024, 12, 31), &[TaskEntry::new(23, "Countdown")]);

        assert_eq!(format_local_timestamp(events[0].start), "20241231T230000");
        assert_eq!(format_local_timestamp(events[0].end), "20250101T000000");
    }

    #[test]
    fn out_of_range_hour_is_computed_mechanically() {
        let events = calendar_events(date(2024, 2, 28), &[TaskEntry::new(30, "Late")]);

        assert_eq!(format_local_timestamp(events[0].start), "20240229T060000");
        assert_eq!(format_local_timestamp(events[0].end), "20240229T070000");
        assert_eq!(events[0].uid, "2024-02-28-30-0@hourly-planner");
    }

    #[test]
    fn duplicate_hours_get_distinct_uids() {
        let entries = vec![
            TaskEntry::new(9, "First"),
            TaskEntry::new(9, ""),
            TaskEntry::new(9, "Second"),
        ];
        let events = calendar_events(date(2024, 3, 15), &entries);

        let uids: Vec<_> = events.iter().map(|e| e.uid.as_str()).collect();
        assert_eq!(
            uids,
            vec![
                "2024-03-15-9-0@hourly-planner",
                "2024-03-15-9-1@hourly-planner"
            ]
        );
    }

    #[test]
    fn unsorted_entries_keep_their_order() {
        let entries = vec![TaskEntry::new(15, "Later"), TaskEntry::new(8, "Earlier")];
        let events = calendar_events(date(2024, 3, 15), &entries);

        assert_eq!(events[0].summary, "Later");
        assert_eq!(events[1].summary, "Earlier");
        assert_eq!(events[1].uid, "2024-03-15-8-1@hourly-planner");
    }

    #[test]
    fn uids_are_stable_for_identical_input() {
        let entries = vec![TaskEntry::new(11, "Review")];
        assert_eq!(
            calendar_events(date(2024, 3, 15), &entries),
            calendar_events(date(2024, 3, 15), &entries)
        );
    }

    #[test]
    fn dtstamp_is_shared_and_comes_from_the_clock() {
        let entries = vec![TaskEntry::new(9, "a"), TaskEntry::new(10, "b")];
        let doc = build_day_document(date(2030, 1, 1), &entries, &clock());

        assert_eq!(
            lines_with_prefix(&doc, "DTSTAMP:"),
            vec!["DTSTAMP:20240314T183005", "DTSTAMP:20240314T183005"]
        );
    }

    #[test]
    fn clock_is_read_once_per_document() {
        let clock = TickingClock::starting_at(date(2024, 3, 14).and_hms_opt(18, 30, 5).unwrap());
        let entries = vec![
            TaskEntry::new(9, "a"),
            TaskEntry::new(10, "b"),
            TaskEntry::new(11, "c"),
        ];

        let doc = build_day_document(date(2024, 3, 15), &entries, &clock);

        assert_eq!(clock.reads.get(), 1);
        assert_eq!(
            lines_with_prefix(&doc, "DTSTAMP:"),
            vec!["DTSTAMP:20240314T183005"; 3]
        );
    }

    #[test]
    fn byte_order_mark_title_is_filtered() {
        let entries = vec![TaskEntry::new(9, "\u{FEFF}"), TaskEntry::new(10, "\u{85}")];
        let events = calendar_events(date(2024, 3, 15), &entries);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].uid, "2024-03-15-10-0@hourly-planner");
    }

    #[test]
    fn summary_round_trips_through_decoder() {
        let title = "path C:\\dir\\n, with; odd\ncharacters\\";
        let doc = build_day_document(date(2024, 3, 15), &[TaskEntry::new(9, title)], &clock());

        let summary = lines_with_prefix(&doc, "SUMMARY:")[0];
        let value = summary.strip_prefix("SUMMARY:").unwrap();
        assert_eq!(unescape_text(value), title);
    }

    #[test]
    fn title_is_not_trimmed_in_summary() {
        let events = calendar_events(date(2024, 3, 15), &[TaskEntry::new(9, "  padded  ")]);
        assert_eq!(events[0].summary, "  padded  ");
    }

    #[test]
    fn filename_uses_prefix_and_date() {
        assert_eq!(
            export_filename("MySchedule", date(2024, 3, 5)),
            "MySchedule-2024-03-05.ics"
        );
    }
}
