//! Workbook discovery and loading.
//!
//! Resolves command-line inputs to DASA outage logs and decodes the first
//! worksheet of each into an [`OutageSheet`] for the aggregator.

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use outage_core::error::{OutageError, Result};
use outage_core::models::{CellValue, OutageSheet};
use tracing::{debug, warn};

/// The only spreadsheet type accepted as input.
pub const WORKBOOK_EXTENSION: &str = "xlsx";

// ── Public API ────────────────────────────────────────────────────────────────

/// Returns `true` when `path` carries the `.xlsx` extension (any case).
pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case(WORKBOOK_EXTENSION))
        .unwrap_or(false)
}

/// Find all `.xlsx` files recursively under `dir`, sorted by path.
///
/// Office lock files (`~$name.xlsx`) are skipped.
pub fn find_workbooks(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && is_workbook(entry.path())
                && !entry.file_name().to_string_lossy().starts_with("~$")
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Expand command-line inputs into the ordered list of files to process.
///
/// Directories are replaced by the workbooks they contain. Explicit files are
/// kept as given, whatever their extension, so that a wrong file type is
/// reported against its own label instead of vanishing.
pub fn collect_input_files(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let found = find_workbooks(input);
            if found.is_empty() {
                warn!("No .xlsx files found in {}", input.display());
            }
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }
    files
}

/// Load the first worksheet of an outage log.
///
/// The first row of the used range is the header row; every following row
/// becomes a row of typed cells.
pub fn load_outage_sheet(path: &Path) -> Result<OutageSheet> {
    if !is_workbook(path) {
        return Err(OutageError::UnsupportedFileType(path.to_path_buf()));
    }

    std::fs::metadata(path).map_err(|source| OutageError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut workbook = open_workbook_auto(path).map_err(|e| OutageError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| OutageError::EmptyWorkbook(path.to_path_buf()))?
        .map_err(|e| OutageError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(header_text).collect())
        .unwrap_or_default();
    let rows: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(to_cell_value).collect())
        .collect();

    debug!(
        "Loaded {} columns, {} rows from {}",
        headers.len(),
        rows.len(),
        path.display()
    );

    Ok(OutageSheet { headers, rows })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Map a calamine cell onto the workbook-agnostic [`CellValue`].
fn to_cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map_or(CellValue::Empty, CellValue::DateTime),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
