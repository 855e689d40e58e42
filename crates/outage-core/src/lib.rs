//! Domain layer for the DASA outage report.
//!
//! Holds the outage data model, reason-code classification, the canonical
//! plant-name table, day-first timestamp parsing, display formatting, the
//! shared error type and the command-line settings.

pub mod error;
pub mod formatting;
pub mod models;
pub mod plants;
pub mod settings;
pub mod time_utils;

pub use error::{OutageError, Result};
