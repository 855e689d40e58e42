//! Report table view for the outage preview.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per aggregate
//! row plus a highlighted totals row at the bottom, and the same table as
//! aligned plain text for non-interactive output.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use outage_core::formatting;
use outage_core::models::{AggregateRow, ReasonClass};

use crate::themes::Theme;

/// Column titles, in display order.
pub const COLUMN_TITLES: [&str; 4] = ["Source", "Unit", "Reason", "Total Days"];

/// Data for a single row in the report table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRowData {
    pub source: String,
    pub unit: String,
    /// `"PO"` or `"FO"`.
    pub reason: String,
    pub total_days: f64,
}

impl From<&AggregateRow> for TableRowData {
    fn from(row: &AggregateRow) -> Self {
        Self {
            source: row.source.clone(),
            unit: row.unit.clone(),
            reason: row.reason.label().to_string(),
            total_days: row.total_days,
        }
    }
}

/// Totals shown in the last table row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableTotals {
    /// Sum of Total Days over PO rows.
    pub planned_days: f64,
    /// Sum of Total Days over FO rows.
    pub forced_days: f64,
    pub row_count: usize,
}

impl TableTotals {
    pub fn from_rows(rows: &[TableRowData]) -> Self {
        let sum_for = |class: ReasonClass| -> f64 {
            rows.iter()
                .filter(|r| r.reason == class.label())
                .map(|r| r.total_days)
                .sum()
        };
        Self {
            planned_days: sum_for(ReasonClass::Planned),
            forced_days: sum_for(ReasonClass::Forced),
            row_count: rows.len(),
        }
    }

    fn summary(&self) -> String {
        format!(
            "PO {} · FO {}",
            formatting::format_days(self.planned_days),
            formatting::format_days(self.forced_days)
        )
    }
}

/// Number of data rows that fit in a bordered table of `height` lines
/// (borders, header and totals row excluded).
pub fn visible_rows(height: u16) -> usize {
    height.saturating_sub(4) as usize
}

/// Render the report table into `area`, starting at data row `scroll`.
///
/// Only as many data rows as fit are drawn, so the totals row is always
/// shown whatever the scroll position.
pub fn render_table_view(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[TableRowData],
    totals: &TableTotals,
    scroll: usize,
    theme: &Theme,
) {
    let header_cells = COLUMN_TITLES
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let data_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .skip(scroll)
        .take(visible_rows(area.height))
        .map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(row.source.clone()),
                Cell::from(row.unit.clone()),
                Cell::from(row.reason.clone()).style(theme.reason_style(&row.reason)),
                Cell::from(formatting::format_days(row.total_days)),
            ])
            .style(style)
        })
        .collect();

    let total_row = Row::new(vec![
        Cell::from("TOTAL"),
        Cell::from(formatting::format_row_count(totals.row_count)),
        Cell::from(""),
        Cell::from(totals.summary()),
    ])
    .style(theme.table_total);

    let mut all_rows = data_rows;
    all_rows.push(total_row);

    let widths = [
        Constraint::Min(30),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(24),
    ];

    let table = Table::new(all_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", title)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render a placeholder when the batch produced no rows.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No report rows to preview", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Check the notices above for files that could not be processed.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Esc to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text))
            .block(Block::default().borders(Borders::ALL).title(" Preview ")),
        area,
    );
}

// ── Plain text ────────────────────────────────────────────────────────────────

/// The report table as aligned plain text, one line per row plus a header,
/// a rule and a totals line.
pub fn render_plain(rows: &[TableRowData], totals: &TableTotals) -> String {
    let body: Vec<[String; 4]> = rows
        .iter()
        .map(|r| {
            [
                r.source.clone(),
                r.unit.clone(),
                r.reason.clone(),
                formatting::format_days(r.total_days),
            ]
        })
        .collect();
    let total_line = [
        "TOTAL".to_string(),
        formatting::format_row_count(totals.row_count),
        String::new(),
        totals.summary(),
    ];

    let mut widths = COLUMN_TITLES.map(UnicodeWidthStr::width);
    for cells in body.iter().chain(std::iter::once(&total_line)) {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(cell.width());
        }
    }

    let titles = COLUMN_TITLES.map(str::to_string);
    let mut out = String::new();
    out.push_str(&plain_line(&titles, &widths));
    let rule_width = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    out.push_str(&"-".repeat(rule_width));
    out.push('\n');
    for cells in &body {
        out.push_str(&plain_line(cells, &widths));
    }
    out.push_str(&"-".repeat(rule_width));
    out.push('\n');
    out.push_str(&plain_line(&total_line, &widths));
    out
}

/// Text columns are left-aligned, the numeric last column right-aligned.
fn plain_line(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let mut line = String::new();
    for (idx, (cell, width)) in cells.iter().zip(widths).enumerate() {
        let pad = " ".repeat(width.saturating_sub(cell.width()));
        if idx > 0 {
            line.push_str("  ");
        }
        if idx == cells.len() - 1 {
            line.push_str(&pad);
            line.push_str(cell);
        } else {
            line.push_str(cell);
            line.push_str(&pad);
        }
    }
    line.truncate(line.trim_end().len());
    line.push('\n');
    line
}

// ── Tests ──────────────────────────────────────────────────────────────────────
