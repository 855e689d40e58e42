//! Spreadsheet fixtures shared by the unit tests.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use rust_xlsxwriter::{Format, Workbook};

pub const LOG_HEADERS: [&str; 4] = ["Unit", "Reason", "Start Time", "End Time"];

/// Write a single-sheet workbook of text cells to `dir/name`.
pub fn write_outage_log<const N: usize>(
    dir: &Path,
    name: &str,
    headers: &[&str],
    rows: &[[&str; N]],
) -> PathBuf {
    let path = dir.join(name);
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet.write_string(r as u32 + 1, col as u16, *value).unwrap();
            }
        }
    }

    workbook.save(&path).unwrap();
    path
}

/// Write a one-row outage log whose timestamps are native date cells.
pub fn write_workbook_with_dates(
    dir: &Path,
    name: &str,
    unit: &str,
    reason: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> PathBuf {
    let path = dir.join(name);
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("dd/mm/yyyy hh:mm");
    let sheet = workbook.add_worksheet();

    for (col, header) in LOG_HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    sheet.write_string(1, 0, unit).unwrap();
    sheet.write_string(1, 1, reason).unwrap();
    sheet
        .write_number_with_format(1, 2, excel_serial(start), &date_format)
        .unwrap();
    sheet
        .write_number_with_format(1, 3, excel_serial(end), &date_format)
        .unwrap();

    workbook.save(&path).unwrap();
    path
}

/// Serial date in the 1900 date system, as stored by spreadsheet apps.
pub fn excel_serial(dt: NaiveDateTime) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    (dt - epoch).num_milliseconds() as f64 / 86_400_000.0
}
