use crate::themes::Theme;
use ratatui::text::{Line, Span};

pub const TITLE: &str = "DASA REASON CODE PROCESSOR";

/// Reporting-period reminder shown under the title.
pub const PERIOD_NOTE: &str =
    "Outage logs must span 12:00 AM on the 1st to 12:00 AM on the 1st of the next month.";

/// Preview header rendering four lines:
///
/// 1. Application title.
/// 2. A 60-column `=` separator.
/// 3. The reporting-period reminder.
/// 4. `[ N file(s) | output ]`.
pub struct Header<'a> {
    pub file_count: usize,
    /// Report file name, or `"-"` when nothing was written.
    pub output: &'a str,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(file_count: usize, output: &'a str, theme: &'a Theme) -> Self {
        Self {
            file_count,
            output,
            theme,
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);
        let files = if self.file_count == 1 {
            "1 file".to_string()
        } else {
            format!("{} files", self.file_count)
        };

        vec![
            Line::from(Span::styled(TITLE, self.theme.header)),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(Span::styled(PERIOD_NOTE, self.theme.header_note)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(files, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.output, self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
