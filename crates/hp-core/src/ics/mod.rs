//! iCalendar (RFC 5545) export of a planned day.

mod document;
mod format;

pub use document::{
    CalendarEvent, ICS_EXTENSION, ICS_MIME_TYPE, PRODID, UID_DOMAIN, build_day_document,
    calendar_events, export_filename,
};
pub use format::{escape_text, format_date_key, format_local_timestamp, unescape_text};
