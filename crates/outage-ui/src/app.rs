//! Preview screen and its event loop.
//!
//! [`App`] owns the theme and the scroll position. [`App::run_preview`]
//! draws a finished batch once it is available and waits for the user to
//! scroll or quit.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame, Terminal,
};

use outage_core::models::{Artifact, Notice};

use crate::components::{ArtifactIndicator, Header, NoticeList};
use crate::table_view::{self, TableRowData, TableTotals};
use crate::themes::Theme;

const KEY_HINTS: &str = "↑/↓ scroll · PgUp/PgDn page · q/Esc quit";

// ── PreviewData ───────────────────────────────────────────────────────────────

/// Everything the preview shows about one finished batch.
#[derive(Debug, Clone, Default)]
pub struct PreviewData {
    pub rows: Vec<TableRowData>,
    pub totals: TableTotals,
    pub notices: Vec<Notice>,
    pub artifact: Option<Artifact>,
    /// Number of input files in the batch.
    pub file_count: usize,
}

impl PreviewData {
    pub fn new(
        rows: Vec<TableRowData>,
        notices: Vec<Notice>,
        artifact: Option<Artifact>,
        file_count: usize,
    ) -> Self {
        let totals = TableTotals::from_rows(&rows);
        Self {
            rows,
            totals,
            notices,
            artifact,
            file_count,
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    pub theme: Theme,
    /// Index of the first data row shown in the table.
    pub scroll: usize,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            scroll: 0,
            should_quit: false,
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Show `data` full-screen until `q`, `Esc` or `Ctrl+C`.
    pub fn run_preview(mut self, data: &PreviewData) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame, data)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => break Err(e),
            }
            match event::read() {
                Ok(Event::Key(key)) => {
                    let page = match terminal.size() {
                        Ok(size) => {
                            let area = Rect::new(0, 0, size.width, size.height);
                            table_view::visible_rows(self.table_area(area, data).height)
                        }
                        Err(e) => break Err(e),
                    };
                    self.handle_key(key, data.rows.len(), page);
                }
                Ok(_) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// Apply one key press. `page` is the number of rows visible at once.
    pub fn handle_key(&mut self, key: KeyEvent, row_count: usize, page: usize) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let max_scroll = row_count.saturating_sub(page.max(1));
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = (self.scroll + 1).min(max_scroll),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(page.max(1)),
            KeyCode::PageDown => self.scroll = (self.scroll + page.max(1)).min(max_scroll),
            KeyCode::Home => self.scroll = 0,
            KeyCode::End => self.scroll = max_scroll,
            _ => {}
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Split `area` into header, notices, artifact line, table and key hints.
    fn layout(area: Rect, data: &PreviewData) -> [Rect; 5] {
        let notice_lines = data.notices.len().max(1) as u16;
        Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(notice_lines),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(area)
    }

    fn table_area(&self, area: Rect, data: &PreviewData) -> Rect {
        Self::layout(area, data)[3]
    }

    pub fn render(&self, frame: &mut Frame, data: &PreviewData) {
        let [header_area, notice_area, artifact_area, table_area, hint_area] =
            Self::layout(frame.area(), data);

        let output = data
            .artifact
            .as_ref()
            .map(Artifact::file_name)
            .unwrap_or_else(|| "-".to_string());
        let header = Header::new(data.file_count, &output, &self.theme);
        frame.render_widget(Paragraph::new(Text::from(header.to_lines())), header_area);

        let notice_lines = NoticeList::new(&data.notices, &self.theme).to_lines();
        frame.render_widget(Paragraph::new(Text::from(notice_lines)), notice_area);

        let artifact_line = ArtifactIndicator::new(data.artifact.as_ref(), &self.theme).to_line();
        frame.render_widget(Paragraph::new(artifact_line), artifact_area);

        if data.rows.is_empty() {
            table_view::render_no_data(frame, table_area, &self.theme);
        } else {
            table_view::render_table_view(
                frame,
                table_area,
                "Outage Summary",
                &data.rows,
                &data.totals,
                self.scroll,
                &self.theme,
            );
        }

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(KEY_HINTS, self.theme.dim))),
            hint_area,
        );
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
