use std::path::PathBuf;
use thiserror::Error;

/// All errors produced while building an outage report.
#[derive(Error, Debug)]
pub enum OutageError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The spreadsheet payload could not be opened or decoded.
    #[error("Failed to open workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// The workbook has no worksheet to read outage rows from.
    #[error("Workbook {0} contains no worksheets")]
    EmptyWorkbook(PathBuf),

    /// A required column header is absent from the outage log.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Only `.xlsx` workbooks are accepted as input.
    #[error("Unsupported file type: {0} (expected .xlsx)")]
    UnsupportedFileType(PathBuf),

    /// The output workbook could not be written.
    #[error("Failed to write workbook {path}: {message}")]
    WorkbookWrite { path: PathBuf, message: String },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the outage crates.
pub type Result<T> = std::result::Result<T, OutageError>;
