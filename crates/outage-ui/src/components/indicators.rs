use crate::themes::Theme;
use outage_core::models::{Artifact, Notice, NoticeLevel};
use ratatui::text::{Line, Span};

// ── NoticeList ───────────────────────────────────────────────────────────────

/// Batch notices, one line each, prefixed by a level marker.
///
/// | Level   | Marker |
/// |---------|--------|
/// | success | ✅     |
/// | warning | ⚠️     |
/// | error   | ❌     |
pub struct NoticeList<'a> {
    pub notices: &'a [Notice],
    pub theme: &'a Theme,
}

impl<'a> NoticeList<'a> {
    pub fn new(notices: &'a [Notice], theme: &'a Theme) -> Self {
        Self { notices, theme }
    }

    pub fn marker(level: NoticeLevel) -> &'static str {
        match level {
            NoticeLevel::Success => "✅",
            NoticeLevel::Warning => "⚠️",
            NoticeLevel::Error => "❌",
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        self.notices
            .iter()
            .map(|notice| {
                Line::from(vec![
                    Span::raw(Self::marker(notice.level)),
                    Span::raw(" "),
                    Span::styled(
                        notice.message.as_str(),
                        self.theme.notice_style(notice.level),
                    ),
                ])
            })
            .collect()
    }
}

// ── ArtifactIndicator ────────────────────────────────────────────────────────

/// Where the report was saved, and as what.
///
/// Format: `"📥 Report: processed_data.xlsx (application/vnd...sheet)"`, or a
/// dimmed `"No report written"` when there is no artifact.
pub struct ArtifactIndicator<'a> {
    pub artifact: Option<&'a Artifact>,
    pub theme: &'a Theme,
}

impl<'a> ArtifactIndicator<'a> {
    pub fn new(artifact: Option<&'a Artifact>, theme: &'a Theme) -> Self {
        Self { artifact, theme }
    }

    pub fn to_line(&self) -> Line<'a> {
        match self.artifact {
            Some(artifact) => Line::from(vec![
                Span::styled("📥 Report: ", self.theme.label),
                Span::styled(artifact.path.display().to_string(), self.theme.value),
                Span::styled(format!(" ({})", artifact.mime_type), self.theme.dim),
            ]),
            None => Line::from(Span::styled("No report written", self.theme.dim)),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
