//! Consolidated report workbook.
//!
//! One worksheet per processed log, each with the columns
//! `Source | Unit | Reason | Total Days`.

use std::collections::HashSet;
use std::path::Path;

use outage_core::error::{OutageError, Result};
use outage_core::models::AggregateTable;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tracing::{debug, info};

/// Longest worksheet name a workbook accepts.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Header row of every report sheet.
pub const REPORT_HEADERS: [&str; 4] = ["Source", "Unit", "Reason", "Total Days"];

const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];
const COLUMN_WIDTHS: [f64; 4] = [36.0, 12.0, 8.0, 12.0];

// ── Sheet naming ──────────────────────────────────────────────────────────────

/// The first 31 characters of `label`.
pub fn sheet_name(label: &str) -> String {
    label.chars().take(MAX_SHEET_NAME_LEN).collect()
}

/// Worksheet names for `labels`, in order.
///
/// Each name is the truncated label with characters a workbook rejects
/// replaced by `_`. A blank name becomes `Sheet{n}` (1-based position).
/// Names that collide case-insensitively with an earlier one get a `_{k}`
/// suffix, shortening the stem so the result stays within the length limit.
pub fn sheet_names<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    // Excel keeps this name for itself.
    used.insert("history".to_string());

    let mut names = Vec::with_capacity(labels.len());
    for (idx, label) in labels.iter().enumerate() {
        let mut base = sanitize(&sheet_name(label.as_ref()));
        if base.trim().is_empty() {
            base = format!("Sheet{}", idx + 1);
        }

        let mut candidate = base.clone();
        let mut k = 2;
        while used.contains(&candidate.to_lowercase()) {
            let suffix = format!("_{k}");
            let stem: String = base
                .chars()
                .take(MAX_SHEET_NAME_LEN - suffix.chars().count())
                .collect();
            candidate = format!("{stem}{suffix}");
            k += 1;
        }

        used.insert(candidate.to_lowercase());
        names.push(candidate);
    }
    names
}

fn sanitize(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if FORBIDDEN_SHEET_CHARS.contains(&c) { '_' } else { c })
        .collect();

    // Leading or trailing apostrophes are rejected too.
    let mut chars: Vec<char> = replaced.chars().collect();
    if chars.first() == Some(&'\'') {
        chars[0] = '_';
    }
    if let Some(last) = chars.last_mut() {
        if *last == '\'' {
            *last = '_';
        }
    }
    chars.into_iter().collect()
}

// ── Writing ───────────────────────────────────────────────────────────────────

/// Write one worksheet per `(label, table)` pair to `path`.
///
/// Sheets appear in input order. The parent directory is created when
/// missing and an existing file is replaced.
pub fn write_workbook(path: &Path, sheets: &[(&str, &AggregateTable)]) -> Result<()> {
    let to_err = |e: XlsxError| OutageError::WorkbookWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let labels: Vec<&str> = sheets.iter().map(|(label, _)| *label).collect();
    let names = sheet_names(&labels);
    let header_format = Format::new().set_bold();

    let mut workbook = Workbook::new();
    for (name, (label, table)) in names.iter().zip(sheets) {
        let sheet = workbook.add_worksheet();
        sheet.set_name(name).map_err(to_err)?;

        for (col, header) in REPORT_HEADERS.iter().enumerate() {
            sheet
                .write_with_format(0, col as u16, *header, &header_format)
                .map_err(to_err)?;
        }
        for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
            sheet.set_column_width(col as u16, *width).ok();
        }

        for (idx, row) in table.rows.iter().enumerate() {
            let r = idx as u32 + 1;
            sheet.write(r, 0, row.source.as_str()).map_err(to_err)?;
            sheet.write(r, 1, row.unit.as_str()).map_err(to_err)?;
            sheet.write(r, 2, row.reason.label()).map_err(to_err)?;
            sheet.write(r, 3, row.total_days).map_err(to_err)?;
        }

        debug!("Sheet '{}' ({}): {} rows", name, label, table.len());
    }

    workbook.save(path).map_err(to_err)?;
    info!("Wrote {} sheet(s) to {}", sheets.len(), path.display());
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
