//! Planned / forced outage aggregation for one DASA log.
//!
//! Turns the typed rows of an [`OutageSheet`] into per-unit day totals for
//! each [`ReasonClass`], tagged with the plant the log belongs to.

use std::collections::BTreeMap;

use outage_core::error::Result;
use outage_core::models::{
    AggregateRow, AggregateTable, OutageRecord, OutageSheet, ReasonClass, END_TIME_COLUMN,
    HOURS_PER_DAY, REASON_COLUMN, START_TIME_COLUMN, UNIT_COLUMN,
};
use outage_core::plants::resolve_source;
use outage_core::time_utils::parse_cell_timestamp;
use tracing::debug;

// ── ParsedRecords ─────────────────────────────────────────────────────────────

/// Rows of one sheet that survived timestamp parsing.
#[derive(Debug, Clone, Default)]
pub struct ParsedRecords {
    pub records: Vec<OutageRecord>,
    /// Rows dropped because Start Time or End Time did not parse.
    pub dropped: usize,
}

// ── OutageAggregator ──────────────────────────────────────────────────────────

/// Stateless helper that groups outage records by unit and reason class.
pub struct OutageAggregator;

impl OutageAggregator {
    /// Aggregate one outage log into PO and FO day totals per unit.
    ///
    /// `label` is the log's base file name; it is resolved to the canonical
    /// plant name for the `Source` column. PO rows come before FO rows and
    /// units are ascending within each class. A log without any qualifying
    /// rows yields an empty table.
    pub fn aggregate(sheet: &OutageSheet, label: &str) -> Result<AggregateTable> {
        let parsed = Self::parse_records(sheet)?;
        let source = resolve_source(label);

        let mut rows = Vec::new();
        for class in [ReasonClass::Planned, ReasonClass::Forced] {
            let hours_by_unit = Self::sum_hours_by_unit(&parsed.records, class);
            debug!(
                "{}: {} {} units",
                label,
                hours_by_unit.len(),
                class.label()
            );
            rows.extend(hours_by_unit.into_iter().map(|(unit, hours)| AggregateRow {
                source: source.clone(),
                unit,
                reason: class,
                total_days: hours / HOURS_PER_DAY,
            }));
        }

        Ok(AggregateTable { rows })
    }

    /// Extract the four required columns and parse both timestamps.
    ///
    /// Fails when a required column is missing. Rows whose Start Time or End
    /// Time cannot be parsed are dropped and counted.
    pub fn parse_records(sheet: &OutageSheet) -> Result<ParsedRecords> {
        let unit_col = sheet.column_index(UNIT_COLUMN)?;
        let reason_col = sheet.column_index(REASON_COLUMN)?;
        let start_col = sheet.column_index(START_TIME_COLUMN)?;
        let end_col = sheet.column_index(END_TIME_COLUMN)?;

        let mut parsed = ParsedRecords::default();
        for row in 0..sheet.rows.len() {
            let start = parse_cell_timestamp(sheet.cell(row, start_col));
            let end = parse_cell_timestamp(sheet.cell(row, end_col));
            let (Some(start_time), Some(end_time)) = (start, end) else {
                parsed.dropped += 1;
                continue;
            };

            parsed.records.push(OutageRecord {
                unit: sheet.cell(row, unit_col).as_key(),
                reason: sheet.cell(row, reason_col).as_key().unwrap_or_default(),
                start_time,
                end_time,
            });
        }

        debug!(
            "Parsed {} outage rows, dropped {} with unparseable timestamps",
            parsed.records.len(),
            parsed.dropped
        );

        Ok(parsed)
    }

    /// Total hours per unit for records in `class`.
    ///
    /// Records without a unit are left out. Keys are sorted ascending.
    pub fn sum_hours_by_unit(records: &[OutageRecord], class: ReasonClass) -> BTreeMap<String, f64> {
        let mut map: BTreeMap<String, f64> = BTreeMap::new();

        for record in records {
            if ReasonClass::from_code(&record.reason) != Some(class) {
                continue;
            }
            if let Some(unit) = &record.unit {
                *map.entry(unit.clone()).or_insert(0.0) += record.duration_hours();
            }
        }

        map
    }

    /// Concatenate per-file tables in the given order.
    pub fn combine<'a>(tables: impl IntoIterator<Item = &'a AggregateTable>) -> AggregateTable {
        let mut combined = AggregateTable::default();
        for table in tables {
            combined.extend(table);
        }
        combined
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
