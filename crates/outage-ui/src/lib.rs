//! Terminal UI layer for the DASA outage report.
//!
//! Provides themes, the header and notice components, the report table view
//! (full-screen and plain text) and the preview event loop built on top of
//! [`ratatui`].

pub mod app;
pub mod components;
pub mod table_view;
pub mod themes;

pub use outage_core as core;
