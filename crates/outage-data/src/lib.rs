//! Data layer for the DASA outage report.
//!
//! Responsible for discovering and reading outage log workbooks, aggregating
//! planned and forced outage days per unit, running a batch over many logs
//! and writing the consolidated report workbook.

pub mod aggregator;
pub mod batch;
pub mod reader;
pub mod writer;

#[cfg(test)]
mod test_support;

pub use outage_core as core;
