use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use tracing::trace;

use crate::models::CellValue;

// ── Accepted text layouts ─────────────────────────────────────────────────────

/// Day-first date/time layouts, tried in order.
///
/// Two-digit-year layouts come before four-digit ones because `%Y` happily
/// reads `24` as the year 24 AD.
const DAY_FIRST_DATETIME_FMTS: &[&str] = &[
    "%d/%m/%y %H:%M:%S",
    "%d/%m/%y %H:%M",
    "%d/%m/%Y %H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %I:%M:%S %p",
    "%d/%m/%Y %I:%M %p",
    "%d-%m-%Y %H:%M:%S%.f",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d-%m-%Y %I:%M:%S %p",
    "%d-%m-%Y %I:%M %p",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

const DAY_FIRST_DATE_FMTS: &[&str] = &["%d/%m/%y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];

/// Year-first layouts are unambiguous and accepted regardless of the
/// day-first convention.
const ISO_DATETIME_FMTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const ISO_DATE_FMTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Largest serial the 1900 date system can express (31 Dec 9999).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.999_999;

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse a text timestamp using the day-first convention.
///
/// `"03/04/2024"` is 3 April 2024. ISO layouts such as `"2024-01-01 00:00"`
/// are also accepted. Returns `None` for blank or unrecognised input.
pub fn parse_day_first(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DAY_FIRST_DATETIME_FMTS.iter().chain(ISO_DATETIME_FMTS) {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in DAY_FIRST_DATE_FMTS.iter().chain(ISO_DATE_FMTS) {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    trace!("could not parse timestamp \"{}\"", s);
    None
}

/// Convert a spreadsheet serial date (1900 date system) to a timestamp.
///
/// Day zero is 1899-12-30, which absorbs the phantom 29 Feb 1900 for every
/// serial after February 1900.
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(0.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(TimeDelta::try_milliseconds(millis)?)
}

/// Interpret a spreadsheet cell as a timestamp.
///
/// Native date cells are used as-is, numeric cells are treated as serial
/// dates and text goes through [`parse_day_first`].
pub fn parse_cell_timestamp(cell: &CellValue) -> Option<NaiveDateTime> {
    match cell {
        CellValue::DateTime(dt) => Some(*dt),
        CellValue::Number(n) => excel_serial_to_datetime(*n),
        CellValue::Text(s) => parse_day_first(s),
        CellValue::Empty => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
