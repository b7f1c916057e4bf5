//! Prompt screen - edit the session's prompt template

use crossterm::event::KeyCode;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::llm::{check_template, TemplateIssue, DEFAULT_PROMPT};
use crate::tui::widgets::TextEditor;

const NOTICE: &str = "Make sure the template keeps the {transcript} placeholder and \
                      <markdown></markdown> markers. Press Ctrl+S to save.";

/// Prompt editor state
pub struct PromptScreen {
    editor: TextEditor,
    issues: Vec<TemplateIssue>,
    dirty: bool,
    row_offset: usize,
    col_offset: usize,
}

impl PromptScreen {
    pub fn new(template: &str) -> Self {
        let mut screen = Self {
            editor: TextEditor::default(),
            issues: Vec::new(),
            dirty: false,
            row_offset: 0,
            col_offset: 0,
        };
        screen.load(template);
        screen
    }

    /// Replace the editor contents with `template`.
    pub fn load(&mut self, template: &str) {
        self.editor = TextEditor::from_text(template);
        self.issues = check_template(template);
        self.dirty = false;
        self.row_offset = 0;
        self.col_offset = 0;
    }

    /// Put the built-in template back in the editor without saving it.
    pub fn reset_to_default(&mut self) {
        self.load(DEFAULT_PROMPT);
        self.dirty = true;
    }

    pub fn text(&self) -> String {
        self.editor.text()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn issues(&self) -> &[TemplateIssue] {
        &self.issues
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        if self.editor.handle_key(key) {
            self.dirty = true;
            self.issues = check_template(&self.editor.text());
        }
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect, status: Option<&str>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Notice
                Constraint::Min(5),    // Editor
                Constraint::Length(1), // Status
                Constraint::Length(1), // Help
            ])
            .split(area);

        let notice = Paragraph::new(NOTICE)
            .style(Style::default().fg(Color::Black).bg(Color::Yellow))
            .wrap(Wrap { trim: true });
        frame.render_widget(notice, chunks[0]);

        self.draw_editor(frame, chunks[1]);

        let status_line = if let Some(message) = status {
            Line::from(Span::styled(
                format!(" {}", message),
                Style::default().fg(Color::Green),
            ))
        } else if let Some(issue) = self.issues.first() {
            Line::from(Span::styled(
                format!(" {}", issue.message()),
                Style::default().fg(Color::Red),
            ))
        } else if self.dirty {
            Line::from(Span::styled(
                " Unsaved changes",
                Style::default().fg(Color::Yellow),
            ))
        } else {
            Line::from("")
        };
        frame.render_widget(Paragraph::new(status_line), chunks[2]);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Ctrl+S ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Save  "),
            Span::styled(" Ctrl+R ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Default  "),
            Span::styled(" F1 ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Help  "),
            Span::styled(" Esc ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Back"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(help, chunks[3]);
    }

    fn draw_editor(&mut self, frame: &mut Frame, area: Rect) {
        let inner_height = area.height.saturating_sub(2) as usize;
        let inner_width = area.width.saturating_sub(2) as usize;
        let (row, col) = self.editor.cursor();

        // Keep the cursor inside the viewport
        if row < self.row_offset {
            self.row_offset = row;
        } else if inner_height > 0 && row >= self.row_offset + inner_height {
            self.row_offset = row + 1 - inner_height;
        }
        if col < self.col_offset {
            self.col_offset = col;
        } else if inner_width > 0 && col >= self.col_offset + inner_width {
            self.col_offset = col + 1 - inner_width;
        }

        let lines: Vec<Line> = self
            .editor
            .lines()
            .iter()
            .map(|l| Line::from(l.as_str()))
            .collect();

        let title = if self.dirty {
            " Prompt template [modified] "
        } else {
            " Prompt template "
        };

        let editor = Paragraph::new(lines)
            .scroll((self.row_offset as u16, self.col_offset as u16))
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );
        frame.render_widget(editor, area);

        frame.set_cursor(
            area.x + 1 + (col - self.col_offset) as u16,
            area.y + 1 + (row - self.row_offset) as u16,
        );
    }
}
