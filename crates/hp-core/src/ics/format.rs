//! Timestamp and TEXT value formatting for iCalendar output.
//!
//! All timestamps are "floating": no `Z` suffix and no `TZID`, so importing
//! applications interpret them in their own local time zone.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

/// Formats a local wall-clock moment as `YYYYMMDDTHHMMSS`.
///
/// Sub-second precision is dropped. The caller's moment is used as-is; the
/// clock is never sampled here.
///
/// The token is only fixed-width (15 characters) for years 0 through 9999;
/// other years render with more digits or a leading sign.
pub fn format_local_timestamp(moment: NaiveDateTime) -> String {
    format!(
        "{:04}{:02}{:02}T{:02}{:02}{:02}",
        moment.year(),
        moment.month(),
        moment.day(),
        moment.hour(),
        moment.minute(),
        moment.second()
    )
}

/// Renders a date as `YYYY-MM-DD`.
pub fn format_date_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Escapes free text for use as an iCalendar TEXT value.
///
/// Backslashes are doubled first so the escapes introduced by the later
/// substitutions are not themselves re-escaped.
pub fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace(',', "\\,")
        .replace(';', "\\;")
}

/// Decodes an iCalendar TEXT value back into plain text.
///
/// Inverse of [`escape_text`]. `\N` is accepted as a newline as well. A
/// backslash followed by any other character, or at the end of input, is kept
/// verbatim.
pub fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n' | 'N') => out.push('\n'),
            Some(',') => out.push(','),
            Some(';') => out.push(';'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
