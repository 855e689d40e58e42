mod bootstrap;

use anyhow::Result;
use outage_core::formatting;
use outage_core::models::NoticeLevel;
use outage_core::settings::{PreviewMode, Settings};
use outage_data::batch::{run_batch, BatchReport, BatchStatus};
use outage_data::reader::collect_input_files;
use outage_ui::app::{App, PreviewData};
use outage_ui::components::NoticeList;
use outage_ui::table_view::{self, TableRowData};

fn main() -> Result<()> {
    let settings = Settings::load();
    let preview = settings.preview_mode()?;

    bootstrap::ensure_directories(&settings.scratch_dir, &settings.output)?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_deref())?;

    tracing::info!("DASA report v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!(
        "Output: {}, Preview: {}, Theme: {}",
        settings.output.display(),
        settings.preview,
        settings.theme
    );

    let inputs = collect_input_files(&settings.inputs);
    let report = run_batch(&inputs, &settings.output);

    if report.status == BatchStatus::Idle {
        tracing::info!("No input files given; pass .xlsx logs or directories to process");
        return Ok(());
    }
    tracing::info!("{}", summary_line(&report));

    let data = preview_data(&report, inputs.len());

    match preview {
        PreviewMode::Tui => App::new(&settings.theme).run_preview(&data)?,
        PreviewMode::Plain => print!("{}", plain_report(&data)),
        PreviewMode::Json => println!("{}", serde_json::to_string_pretty(&report.combined.rows)?),
        PreviewMode::None => {
            for notice in &report.notices {
                match notice.level {
                    NoticeLevel::Error => tracing::error!("{}", notice.message),
                    NoticeLevel::Warning => tracing::warn!("{}", notice.message),
                    NoticeLevel::Success => tracing::info!("{}", notice.message),
                }
            }
        }
    }

    Ok(())
}

/// Convert a finished batch into what the preview surfaces show.
fn preview_data(report: &BatchReport, file_count: usize) -> PreviewData {
    let rows: Vec<TableRowData> = report.combined.rows.iter().map(TableRowData::from).collect();
    PreviewData::new(
        rows,
        report.notices.clone(),
        report.artifact().cloned(),
        file_count,
    )
}

/// One-line account of a finished batch for the log.
fn summary_line(report: &BatchReport) -> String {
    format!(
        "Processed {} file(s): {} failed, {}",
        report.files.len(),
        report.failed_files(),
        formatting::format_row_count(report.combined.len())
    )
}

/// Notices, artifact and table as plain text for stdout.
fn plain_report(data: &PreviewData) -> String {
    let mut out = String::new();
    for notice in &data.notices {
        out.push_str(NoticeList::marker(notice.level));
        out.push(' ');
        out.push_str(&notice.message);
        out.push('\n');
    }
    if let Some(artifact) = &data.artifact {
        out.push_str(&format!(
            "Report: {} ({})\n",
            artifact.path.display(),
            artifact.mime_type
        ));
    }
    if !data.rows.is_empty() {
        out.push('\n');
        out.push_str(&table_view::render_plain(&data.rows, &data.totals));
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────
