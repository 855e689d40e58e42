use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{OutageError, Result};

// ── Column and reason-code constants ──────────────────────────────────────────

pub const UNIT_COLUMN: &str = "Unit";
pub const REASON_COLUMN: &str = "Reason";
pub const START_TIME_COLUMN: &str = "Start Time";
pub const END_TIME_COLUMN: &str = "End Time";

/// Columns every outage log must carry, in lookup order.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    UNIT_COLUMN,
    REASON_COLUMN,
    START_TIME_COLUMN,
    END_TIME_COLUMN,
];

/// DASA reason code for a planned outage.
pub const PLANNED_OUTAGE_CODE: &str = "ACC04";

/// DASA reason codes that count as forced outages.
pub const FORCED_OUTAGE_CODES: [&str; 2] = ["ACC03", "ACC05"];

pub const HOURS_PER_DAY: f64 = 24.0;

/// Default file name of the consolidated workbook.
pub const DEFAULT_OUTPUT_FILE: &str = "processed_data.xlsx";

/// MIME type advertised for the consolidated workbook.
pub const XLSX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

// ── Tabular payload ───────────────────────────────────────────────────────────

/// A single typed spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    /// A cell the workbook stores as a native date/time.
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Render the cell as a grouping key.
    ///
    /// Whole numbers drop their fractional part so a unit typed as `1`
    /// groups as `"1"` rather than `"1.0"`. Empty cells and empty text yield
    /// `None`; whitespace-only text is a real key.
    pub fn as_key(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) if s.is_empty() => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(format!("{}", *n as i64))
            }
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::DateTime(dt) => Some(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }
}

/// The first worksheet of an outage log: a header row plus data rows.
#[derive(Debug, Clone, Default)]
pub struct OutageSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl OutageSheet {
    /// Position of the column whose trimmed header equals `name`.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| OutageError::MissingColumn(name.to_string()))
    }

    /// Cell at (`row`, `col`), treating ragged rows as empty past their end.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(EMPTY)
    }
}

// ── Outage records ────────────────────────────────────────────────────────────

/// One outage event with both timestamps parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct OutageRecord {
    /// Generating unit identifier; `None` when the cell was empty.
    pub unit: Option<String>,
    /// Raw DASA reason code.
    pub reason: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl OutageRecord {
    /// `(end - start)` in hours. Negative when the log has end before start.
    pub fn duration_hours(&self) -> f64 {
        let millis = (self.end_time - self.start_time).num_milliseconds();
        millis as f64 / 1000.0 / 3600.0
    }
}

/// Outage class derived from the reason code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReasonClass {
    #[serde(rename = "PO")]
    Planned,
    #[serde(rename = "FO")]
    Forced,
}

impl ReasonClass {
    /// Classify a raw reason code. Matching is exact; unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        if code == PLANNED_OUTAGE_CODE {
            Some(ReasonClass::Planned)
        } else if FORCED_OUTAGE_CODES.contains(&code) {
            Some(ReasonClass::Forced)
        } else {
            None
        }
    }

    /// Short label written to the report.
    pub fn label(&self) -> &'static str {
        match self {
            ReasonClass::Planned => "PO",
            ReasonClass::Forced => "FO",
        }
    }
}

impl std::fmt::Display for ReasonClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ── Aggregates ────────────────────────────────────────────────────────────────

/// Total downtime for one unit in one reason class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Unit")]
    pub unit: String,
    #[serde(rename = "Reason")]
    pub reason: ReasonClass,
    #[serde(rename = "Total Days")]
    pub total_days: f64,
}

/// Per-file (or combined) report rows in output order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateTable {
    pub rows: Vec<AggregateRow>,
}

impl AggregateTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Append every row of `other`, preserving order.
    pub fn extend(&mut self, other: &AggregateTable) {
        self.rows.extend(other.rows.iter().cloned());
    }
}

// ── Notices and artifacts ─────────────────────────────────────────────────────

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A message surfaced to the user after a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// The consolidated workbook written by a successful batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub mime_type: &'static str,
}

impl Artifact {
    pub fn xlsx(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mime_type: XLSX_MIME_TYPE,
        }
    }

    /// File name offered to the user, e.g. `processed_data.xlsx`.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    // ── ReasonClass ───────────────────────────────────────────────────────────

    #[test]
    fn test_reason_class_planned_code() {
        assert_eq!(ReasonClass::from_code("ACC04"), Some(ReasonClass::Planned));
    }

    #[test]
    fn test_reason_class_forced_codes() {
        assert_eq!(ReasonClass::from_code("ACC03"), Some(ReasonClass::Forced));
        assert_eq!(ReasonClass::from_code("ACC05"), Some(ReasonClass::Forced));
    }

    #[test]
    fn test_reason_class_other_codes_excluded() {
        assert_eq!(ReasonClass::from_code("ACC01"), None);
        assert_eq!(ReasonClass::from_code("acc04"), None);
        assert_eq!(ReasonClass::from_code(" ACC04"), None);
        assert_eq!(ReasonClass::from_code(""), None);
    }

    #[test]
    fn test_reason_class_labels() {
        assert_eq!(ReasonClass::Planned.label(), "PO");
        assert_eq!(ReasonClass::Forced.to_string(), "FO");
    }

    // ── OutageRecord ──────────────────────────────────────────────────────────

    #[test]
    fn test_duration_hours_half_day() {
        let rec = OutageRecord {
            unit: Some("U1".to_string()),
            reason: "ACC04".to_string(),
            start_time: dt(1, 0, 0),
            end_time: dt(1, 12, 0),
        };
        assert_eq!(rec.duration_hours(), 12.0);
    }

    #[test]
    fn test_duration_hours_negative_passes_through() {
        let rec = OutageRecord {
            unit: Some("U1".to_string()),
            reason: "ACC03".to_string(),
            start_time: dt(2, 6, 0),
            end_time: dt(2, 0, 0),
        };
        assert_eq!(rec.duration_hours(), -6.0);
    }

    #[test]
    fn test_duration_hours_minutes() {
        let rec = OutageRecord {
            unit: Some("U1".to_string()),
            reason: "ACC03".to_string(),
            start_time: dt(3, 10, 0),
            end_time: dt(3, 10, 45),
        };
        assert!((rec.duration_hours() - 0.75).abs() < 1e-12);
    }

    // ── CellValue ─────────────────────────────────────────────────────────────

    #[test]
    fn test_cell_key_whole_number_has_no_fraction() {
        assert_eq!(CellValue::Number(1.0).as_key(), Some("1".to_string()));
        assert_eq!(CellValue::Number(2.5).as_key(), Some("2.5".to_string()));
    }

    #[test]
    fn test_cell_key_empty_is_none() {
        assert_eq!(CellValue::Empty.as_key(), None);
        assert_eq!(CellValue::Text(String::new()).as_key(), None);
    }

    #[test]
    fn test_cell_key_whitespace_is_kept() {
        assert_eq!(
            CellValue::Text("  ".to_string()).as_key(),
            Some("  ".to_string())
        );
    }

    #[test]
    fn test_cell_key_text_is_verbatim() {
        assert_eq!(
            CellValue::Text("GT 1A".to_string()).as_key(),
            Some("GT 1A".to_string())
        );
    }

    // ── OutageSheet ───────────────────────────────────────────────────────────

    #[test]
    fn test_column_index_trims_headers() {
        let sheet = OutageSheet {
            headers: vec!["Unit".into(), " Reason ".into(), "Start Time".into()],
            rows: vec![],
        };
        assert_eq!(sheet.column_index("Reason").unwrap(), 1);
    }

    #[test]
    fn test_column_index_missing_column() {
        let sheet = OutageSheet {
            headers: vec!["Unit".into()],
            rows: vec![],
        };
        let err = sheet.column_index("End Time").unwrap_err();
        assert!(matches!(err, OutageError::MissingColumn(ref c) if c == "End Time"));
    }

    #[test]
    fn test_cell_out_of_range_is_empty() {
        let sheet = OutageSheet {
            headers: vec!["Unit".into(), "Reason".into()],
            rows: vec![vec![CellValue::Text("U1".into())]],
        };
        assert_eq!(sheet.cell(0, 1), &CellValue::Empty);
        assert_eq!(sheet.cell(5, 0), &CellValue::Empty);
    }

    // ── AggregateTable ────────────────────────────────────────────────────────

    #[test]
    fn test_aggregate_row_serializes_with_report_headers() {
        let row = AggregateRow {
            source: "Prai Power Sdn Bhd".to_string(),
            unit: "GT1".to_string(),
            reason: ReasonClass::Planned,
            total_days: 0.5,
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["Source"], "Prai Power Sdn Bhd");
        assert_eq!(value["Unit"], "GT1");
        assert_eq!(value["Reason"], "PO");
        assert_eq!(value["Total Days"], 0.5);
    }

    // ── Artifact ──────────────────────────────────────────────────────────────

    #[test]
    fn test_artifact_file_name_and_mime() {
        let artifact = Artifact::xlsx("/tmp/out/processed_data.xlsx");
        assert_eq!(artifact.file_name(), "processed_data.xlsx");
        assert_eq!(artifact.mime_type, XLSX_MIME_TYPE);
    }
}
