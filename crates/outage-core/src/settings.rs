use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::OutageError;
use crate::models::DEFAULT_OUTPUT_FILE;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Planned and forced outage day totals from monthly DASA logs
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dasa-report",
    about = "Planned and forced outage day totals from monthly DASA logs",
    long_about = "Planned and forced outage day totals from monthly DASA logs.\n\n\
        Each log should cover 12:00 AM on the 1st of the month up to \
        12:00 AM on the 1st of the following month.",
    version
)]
pub struct Settings {
    /// DASA outage logs (.xlsx) or directories containing them
    pub inputs: Vec<PathBuf>,

    /// Consolidated workbook to write (overwritten on every run)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Scratch folder created at start-up
    #[arg(long, default_value = "uploads")]
    pub scratch_dir: PathBuf,

    /// How to preview the combined report
    #[arg(long, default_value = "tui", value_parser = ["tui", "plain", "json", "none"])]
    pub preview: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path (logs go to stderr when omitted)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── PreviewMode ────────────────────────────────────────────────────────────────

/// Where the combined report is shown after a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewMode {
    /// Full-screen terminal table.
    Tui,
    /// Aligned text table on stdout.
    Plain,
    /// JSON array on stdout.
    Json,
    /// Artifact only.
    None,
}

impl FromStr for PreviewMode {
    type Err = OutageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tui" => Ok(PreviewMode::Tui),
            "plain" => Ok(PreviewMode::Plain),
            "json" => Ok(PreviewMode::Json),
            "none" => Ok(PreviewMode::None),
            other => Err(OutageError::Config(format!("unknown preview mode: {other}"))),
        }
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply derived values.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// Typed preview mode.
    pub fn preview_mode(&self) -> crate::error::Result<PreviewMode> {
        self.preview.parse()
    }

    /// `--debug` overrides the log level.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
