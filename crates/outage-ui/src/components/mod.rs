//! Small line-oriented widgets composed by the preview screen.

pub mod header;
pub mod indicators;

pub use header::Header;
pub use indicators::{ArtifactIndicator, NoticeList};
