//! One batch run over a set of outage logs.
//!
//! Each file is aggregated independently; a failing file is reported under
//! its label and the remaining files still contribute to the report.

use std::path::{Path, PathBuf};

use outage_core::error::Result;
use outage_core::models::{AggregateTable, Artifact, Notice};
use tracing::{error, info, warn};

use crate::aggregator::OutageAggregator;
use crate::reader::load_outage_sheet;
use crate::writer::write_workbook;

pub const NO_VALID_DATA_MESSAGE: &str = "No valid data found in the uploaded files.";
pub const PROCESSING_COMPLETE_MESSAGE: &str = "Processing complete! Preview below:";

// ── Types ─────────────────────────────────────────────────────────────────────

/// Result of processing a single input file.
#[derive(Debug)]
pub struct FileOutcome {
    pub label: String,
    pub path: PathBuf,
    pub result: Result<AggregateTable>,
}

/// How a batch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchStatus {
    /// No input files were given.
    Idle,
    /// Every file failed or produced no rows; nothing was written.
    NoValidData,
    /// The report workbook was written.
    Written(Artifact),
    /// There was data, but saving the workbook failed.
    WriteFailed,
}

#[derive(Debug)]
pub struct BatchReport {
    pub files: Vec<FileOutcome>,
    /// All non-empty per-file tables concatenated in input order.
    pub combined: AggregateTable,
    pub notices: Vec<Notice>,
    pub status: BatchStatus,
}

impl BatchReport {
    pub fn artifact(&self) -> Option<&Artifact> {
        match &self.status {
            BatchStatus::Written(artifact) => Some(artifact),
            _ => None,
        }
    }

    pub fn failed_files(&self) -> usize {
        self.files.iter().filter(|f| f.result.is_err()).count()
    }
}

// ── Operations ────────────────────────────────────────────────────────────────

/// The label of an input file: its base name without extension.
pub fn label_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read and aggregate one outage log.
pub fn process_file(path: &Path) -> FileOutcome {
    let label = label_for(path);
    let result =
        load_outage_sheet(path).and_then(|sheet| OutageAggregator::aggregate(&sheet, &label));

    FileOutcome {
        label,
        path: path.to_path_buf(),
        result,
    }
}

/// Process `inputs` in order and write the consolidated workbook to `output`.
///
/// Never fails as a whole: per-file errors and write errors end up in
/// [`BatchReport::notices`].
pub fn run_batch(inputs: &[PathBuf], output: &Path) -> BatchReport {
    if inputs.is_empty() {
        info!("No input files; nothing to do");
        return BatchReport {
            files: Vec::new(),
            combined: AggregateTable::default(),
            notices: Vec::new(),
            status: BatchStatus::Idle,
        };
    }

    info!("Processing {} file(s)", inputs.len());
    let files: Vec<FileOutcome> = inputs.iter().map(|p| process_file(p)).collect();

    let mut notices = Vec::new();
    let mut sheets: Vec<(&str, &AggregateTable)> = Vec::new();
    for outcome in &files {
        match &outcome.result {
            Ok(table) if !table.is_empty() => sheets.push((outcome.label.as_str(), table)),
            Ok(_) => info!("{}: no PO/FO rows", outcome.label),
            Err(e) => {
                error!("{} ({}): {}", outcome.label, outcome.path.display(), e);
                notices.push(Notice::error(format!(
                    "Error processing {}: {}",
                    outcome.label, e
                )));
            }
        }
    }

    let combined = OutageAggregator::combine(sheets.iter().map(|(_, table)| *table));

    let status = if sheets.is_empty() {
        warn!("{}", NO_VALID_DATA_MESSAGE);
        notices.push(Notice::warning(NO_VALID_DATA_MESSAGE));
        BatchStatus::NoValidData
    } else {
        match write_workbook(output, &sheets) {
            Ok(()) => {
                notices.push(Notice::success(PROCESSING_COMPLETE_MESSAGE));
                BatchStatus::Written(Artifact::xlsx(output))
            }
            Err(e) => {
                error!("{}", e);
                notices.push(Notice::error(e.to_string()));
                BatchStatus::WriteFailed
            }
        }
    };

    BatchReport {
        files,
        combined,
        notices,
        status,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{write_outage_log, LOG_HEADERS};
    use calamine::{open_workbook_auto, Reader};
    use outage_core::models::{NoticeLevel, ReasonClass, XLSX_MIME_TYPE};
    use tempfile::TempDir;

    // ── label_for ─────────────────────────────────────────────────────────────

    #[test]
    fn test_label_for_strips_directory_and_extension() {
        assert_eq!(label_for(Path::new("/data/march/genting.xlsx")), "genting");
        assert_eq!(label_for(Path::new("sg perak.xlsx")), "sg perak");
        assert_eq!(label_for(Path::new("pd1.report.xlsx")), "pd1.report");
    }

    // ── run_batch ─────────────────────────────────────────────────────────────

    #[test]
    fn test_run_batch_no_inputs_is_idle() {
        let tmp = TempDir::new().expect("tempdir");
        let output = tmp.path().join("processed_data.xlsx");

        let report = run_batch(&[], &output);
        assert_eq!(report.status, BatchStatus::Idle);
        assert!(report.notices.is_empty());
        assert!(report.combined.is_empty());
        assert!(!output.exists());
    }

    #[test]
    fn test_run_batch_writes_artifact() {
        let tmp = TempDir::new().expect("tempdir");
        let input = write_outage_log(
            tmp.path(),
            "genting.xlsx",
            &LOG_HEADERS,
            &[["U1", "ACC04", "2024-01-01 00:00", "2024-01-01 12:00"]],
        );
        let output = tmp.path().join("processed_data.xlsx");

        let report = run_batch(&[input], &output);

        let artifact = report.artifact().expect("artifact");
        assert_eq!(artifact.path, output);
        assert_eq!(artifact.mime_type, XLSX_MIME_TYPE);
        assert!(output.exists());
        assert_eq!(report.combined.len(), 1);
        assert_eq!(report.combined.rows[0].source, "Genting Sanyen Power Sdn. Bhd.");
        assert_eq!(report.combined.rows[0].reason, ReasonClass::Planned);
        assert_eq!(report.combined.rows[0].total_days, 0.5);
        assert_eq!(
            report.notices,
            vec![Notice::success(PROCESSING_COMPLETE_MESSAGE)]
        );
    }

    #[test]
    fn test_run_batch_failure_is_labeled_and_batch_continues() {
        let tmp = TempDir::new().expect("tempdir");
        let broken = write_outage_log(
            tmp.path(),
            "kev.xlsx",
            &["Unit", "Start Time", "End Time"],
            &[["U1", "01/01/2024 00:00", "01/01/2024 06:00"]],
        );
        let good = write_outage_log(
            tmp.path(),
            "tbp.xlsx",
            &LOG_HEADERS,
            &[["U3", "ACC05", "01/01/2024 00:00", "02/01/2024 00:00"]],
        );
        let output = tmp.path().join("out.xlsx");

        let report = run_batch(&[broken, good], &output);

        assert_eq!(report.failed_files(), 1);
        assert_eq!(report.notices.len(), 2);
        assert_eq!(report.notices[0].level, NoticeLevel::Error);
        assert_eq!(
            report.notices[0].message,
            "Error processing kev: Missing required column: Reason"
        );
        assert_eq!(report.notices[1].level, NoticeLevel::Success);

        assert!(matches!(report.status, BatchStatus::Written(_)));
        assert_eq!(report.combined.len(), 1);
        assert_eq!(report.combined.rows[0].source, "Tanjung Bin Power Sdn Bhd");

        let mut workbook = open_workbook_auto(&output).expect("open");
        assert_eq!(workbook.sheet_names(), vec!["tbp"]);
    }

    #[test]
    fn test_run_batch_all_empty_warns_without_artifact() {
        let tmp = TempDir::new().expect("tempdir");
        let a = write_outage_log(
            tmp.path(),
            "genting.xlsx",
            &LOG_HEADERS,
            &[["U1", "ACC01", "01/01/2024 00:00", "01/01/2024 06:00"]],
        );
        let b = write_outage_log::<4>(tmp.path(), "prai.xlsx", &LOG_HEADERS, &[]);
        let output = tmp.path().join("out.xlsx");

        let report = run_batch(&[a, b], &output);

        assert_eq!(report.status, BatchStatus::NoValidData);
        assert_eq!(report.notices, vec![Notice::warning(NO_VALID_DATA_MESSAGE)]);
        assert!(report.artifact().is_none());
        assert!(!output.exists());
    }

    #[test]
    fn test_run_batch_all_failed_warns_after_errors() {
        let tmp = TempDir::new().expect("tempdir");
        let missing = tmp.path().join("absent.xlsx");
        let wrong_type = tmp.path().join("notes.csv");
        std::fs::write(&wrong_type, "Unit,Reason\n").unwrap();
        let output = tmp.path().join("out.xlsx");

        let report = run_batch(&[missing, wrong_type], &output);

        assert_eq!(report.status, BatchStatus::NoValidData);
        let levels: Vec<NoticeLevel> = report.notices.iter().map(|n| n.level).collect();
        assert_eq!(
            levels,
            vec![NoticeLevel::Error, NoticeLevel::Error, NoticeLevel::Warning]
        );
        assert!(report.notices[0].message.starts_with("Error processing absent: "));
        assert!(report.notices[1].message.starts_with("Error processing notes: "));
    }

    #[test]
    fn test_run_batch_combined_follows_input_order() {
        let tmp = TempDir::new().expect("tempdir");
        let tbp = write_outage_log(
            tmp.path(),
            "tbp.xlsx",
            &LOG_HEADERS,
            &[["U1", "ACC04", "01/01/2024 00:00", "02/01/2024 00:00"]],
        );
        let genting = write_outage_log(
            tmp.path(),
            "genting.xlsx",
            &LOG_HEADERS,
            &[["U1", "ACC04", "01/01/2024 00:00", "02/01/2024 00:00"]],
        );
        let output = tmp.path().join("out.xlsx");

        let report = run_batch(&[tbp, genting], &output);

        let sources: Vec<&str> = report.combined.rows.iter().map(|r| r.source.as_str()).collect();
        assert_eq!(
            sources,
            vec!["Tanjung Bin Power Sdn Bhd", "Genting Sanyen Power Sdn. Bhd."]
        );
        let mut workbook = open_workbook_auto(&output).expect("open");
        assert_eq!(workbook.sheet_names(), vec!["tbp", "genting"]);
    }

    #[test]
    fn test_run_batch_long_label_truncated_sheet_name() {
        let tmp = TempDir::new().expect("tempdir");
        let name = format!("{}.xlsx", "genting_outage_log_for_march_2024_final");
        let input = write_outage_log(
            tmp.path(),
            &name,
            &LOG_HEADERS,
            &[["U1", "ACC04", "01/01/2024 00:00", "02/01/2024 00:00"]],
        );
        let output = tmp.path().join("out.xlsx");

        let report = run_batch(&[input], &output);
        assert!(matches!(report.status, BatchStatus::Written(_)));
        // Unmapped label, so Source is the full label.
        assert_eq!(
            report.combined.rows[0].source,
            "genting_outage_log_for_march_2024_final"
        );

        let mut workbook = open_workbook_auto(&output).expect("open");
        assert_eq!(
            workbook.sheet_names(),
            vec!["genting_outage_log_for_march_20"]
        );
    }

    #[test]
    fn test_run_batch_write_failure_reported() {
        let tmp = TempDir::new().expect("tempdir");
        let input = write_outage_log(
            tmp.path(),
            "genting.xlsx",
            &LOG_HEADERS,
            &[["U1", "ACC04", "01/01/2024 00:00", "02/01/2024 00:00"]],
        );
        let output = tmp.path().join("taken.xlsx");
        std::fs::create_dir_all(&output).unwrap();

        let report = run_batch(&[input], &output);

        assert_eq!(report.status, BatchStatus::WriteFailed);
        assert_eq!(report.combined.len(), 1);
        assert_eq!(report.notices.len(), 1);
        assert_eq!(report.notices[0].level, NoticeLevel::Error);
        assert!(report.notices[0].message.starts_with("Failed to write workbook"));
    }
}
