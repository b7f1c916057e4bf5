//! Home screen - URL and key entry, progress, and extracted lessons

use crossterm::event::KeyCode;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
};

use crate::pipeline::RunOutcome;
use crate::tui::RunState;
use crate::tui::widgets::TextInput;
use crate::LessonsError;

/// Which part of the home screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeFocus {
    Url,
    ApiKey,
    Lessons,
}

impl HomeFocus {
    fn next(self) -> Self {
        match self {
            Self::Url => Self::ApiKey,
            Self::ApiKey => Self::Lessons,
            Self::Lessons => Self::Url,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Url => Self::Lessons,
            Self::ApiKey => Self::Url,
            Self::Lessons => Self::ApiKey,
        }
    }
}

/// What the app should do after a home screen key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeAction {
    None,
    Extract,
    ApiKeyChanged,
}

/// Home screen state
pub struct HomeScreen {
    url: TextInput,
    api_key: TextInput,
    focus: HomeFocus,
    lessons: Option<String>,
    scroll_offset: usize,
    content_height: usize,
}

impl HomeScreen {
    pub fn new(api_key: &str, mask_api_key: bool) -> Self {
        Self {
            url: TextInput::default(),
            api_key: TextInput::new(api_key).masked(mask_api_key),
            focus: HomeFocus::Url,
            lessons: None,
            scroll_offset: 0,
            content_height: 0,
        }
    }

    pub fn url(&self) -> &str {
        self.url.value().trim()
    }

    pub fn api_key(&self) -> &str {
        self.api_key.value()
    }

    pub fn focus(&self) -> HomeFocus {
        self.focus
    }

    pub fn lessons(&self) -> Option<&str> {
        self.lessons.as_deref()
    }

    pub fn set_lessons(&mut self, lessons: Option<String>) {
        self.lessons = lessons;
        self.scroll_offset = 0;
    }

    pub fn handle_key(&mut self, key: KeyCode) -> HomeAction {
        match key {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                HomeAction::None
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                HomeAction::None
            }
            KeyCode::Enter if self.focus != HomeFocus::Lessons => HomeAction::Extract,
            _ => match self.focus {
                HomeFocus::Url => {
                    self.url.handle_key(key);
                    HomeAction::None
                }
                HomeFocus::ApiKey => {
                    if self.api_key.handle_key(key) {
                        HomeAction::ApiKeyChanged
                    } else {
                        HomeAction::None
                    }
                }
                HomeFocus::Lessons => {
                    self.scroll(key);
                    HomeAction::None
                }
            },
        }
    }

    fn scroll(&mut self, key: KeyCode) {
        let last = self.content_height.saturating_sub(1);
        self.scroll_offset = match key {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_offset.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => (self.scroll_offset + 1).min(last),
            KeyCode::PageUp => self.scroll_offset.saturating_sub(10),
            KeyCode::PageDown => (self.scroll_offset + 10).min(last),
            KeyCode::Home | KeyCode::Char('g') => 0,
            KeyCode::End | KeyCode::Char('G') => last,
            _ => self.scroll_offset,
        };
    }

    pub fn draw(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        run_state: &RunState,
        has_api_key: bool,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // URL
                Constraint::Length(3), // API key
                Constraint::Length(4), // Status
                Constraint::Min(5),    // Lessons
                Constraint::Length(1), // Help
            ])
            .split(area);

        let title = Paragraph::new("YouTube Lesson Extractor")
            .style(Style::default().fg(Color::Cyan).bold())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(title, chunks[0]);

        let url = Paragraph::new(self.url.display(self.focus == HomeFocus::Url))
            .block(input_block(" YouTube video URL ", self.focus == HomeFocus::Url));
        frame.render_widget(url, chunks[1]);

        let key = Paragraph::new(self.api_key.display(self.focus == HomeFocus::ApiKey)).block(
            input_block(" Google Gemini API key ", self.focus == HomeFocus::ApiKey),
        );
        frame.render_widget(key, chunks[2]);

        let status = Paragraph::new(status_lines(run_state, has_api_key))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(" Status ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(status, chunks[3]);

        self.draw_lessons(frame, chunks[4]);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Extract  "),
            Span::styled(" Tab ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Next field  "),
            Span::styled(" F2 ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Prompt  "),
            Span::styled(" F1 ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Help  "),
            Span::styled(" Esc ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Quit"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(help, chunks[5]);
    }

    fn draw_lessons(&mut self, frame: &mut Frame, area: Rect) {
        let lines = match &self.lessons {
            Some(lessons) => markdown_lines(lessons),
            None => vec![Line::from(Span::styled(
                "Lessons will appear here.",
                Style::default().fg(Color::DarkGray),
            ))],
        };

        self.content_height = lines.len();
        let visible_height = area.height.saturating_sub(2) as usize;

        let border = if self.focus == HomeFocus::Lessons {
            Color::Yellow
        } else {
            Color::Blue
        };

        let lessons = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset as u16, 0))
            .block(
                Block::default()
                    .title(" Lessons ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            );
        frame.render_widget(lessons, area);

        if self.content_height > visible_height {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            let mut scrollbar_state = ScrollbarState::new(self.content_height)
                .position(self.scroll_offset)
                .viewport_content_length(visible_height);

            frame.render_stateful_widget(
                scrollbar,
                area.inner(Margin {
                    horizontal: 0,
                    vertical: 1,
                }),
                &mut scrollbar_state,
            );
        }
    }
}

fn input_block(title: &str, focused: bool) -> Block<'_> {
    let color = if focused { Color::Yellow } else { Color::Blue };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

fn status_lines(run_state: &RunState, has_api_key: bool) -> Vec<Line<'static>> {
    match run_state {
        RunState::Idle if !has_api_key => vec![Line::from(Span::styled(
            "Enter your Gemini API key, then paste a YouTube URL.",
            Style::default().fg(Color::Yellow),
        ))],
        RunState::Idle => vec![Line::from(Span::styled(
            "Paste a YouTube URL and press Enter to extract lessons.",
            Style::default().fg(Color::DarkGray),
        ))],
        RunState::FetchingTranscript { .. } => vec![Line::from(Span::styled(
            "Getting transcript...",
            Style::default().fg(Color::Yellow),
        ))],
        RunState::ExtractingLessons { .. } => vec![Line::from(Span::styled(
            "Extracting lessons...",
            Style::default().fg(Color::Yellow),
        ))],
        RunState::Finished(RunOutcome::Success(_)) => vec![Line::from(Span::styled(
            "Lessons extracted.",
            Style::default().fg(Color::Green),
        ))],
        RunState::Finished(RunOutcome::FailedAtTranscript(err)) => {
            failure_lines("Could not get the transcript.", err)
        }
        RunState::Finished(RunOutcome::FailedAtExtraction(err)) => {
            failure_lines("Could not extract the lessons.", err)
        }
    }
}

fn failure_lines(headline: &'static str, err: &LessonsError) -> Vec<Line<'static>> {
    let detail = match err.reason() {
        Some(reason) => reason.to_string(),
        None => err.to_string(),
    };

    vec![
        Line::from(Span::styled(headline, Style::default().fg(Color::Red).bold())),
        Line::from(Span::styled(detail, Style::default().fg(Color::DarkGray))),
    ]
}

/// Light styling for the markdown the model returns.
fn markdown_lines(text: &str) -> Vec<Line<'static>> {
    text.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let indent = &line[..line.len() - trimmed.len()];

            if let Some(heading) = trimmed.strip_prefix('#') {
                let heading = heading.trim_start_matches('#').trim();
                Line::from(Span::styled(
                    heading.to_string(),
                    Style::default().fg(Color::Cyan).bold(),
                ))
            } else if let Some(item) = trimmed
                .strip_prefix("- ")
                .or_else(|| trimmed.strip_prefix("* "))
            {
                Line::from(vec![
                    Span::raw(indent.to_string()),
                    Span::styled("• ", Style::default().fg(Color::Cyan)),
                    Span::raw(item.to_string()),
                ])
            } else if trimmed.ends_with(':') && !trimmed.starts_with(['-', '*']) {
                Line::from(Span::styled(
                    line.to_string(),
                    Style::default().fg(Color::White).bold(),
                ))
            } else {
                Line::from(line.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn tab_cycles_focus() {
        let mut home = HomeScreen::new("", true);
        assert_eq!(home.focus(), HomeFocus::Url);
        home.handle_key(KeyCode::Tab);
        assert_eq!(home.focus(), HomeFocus::ApiKey);
        home.handle_key(KeyCode::Tab);
        home.handle_key(KeyCode::Tab);
        assert_eq!(home.focus(), HomeFocus::Url);
        home.handle_key(KeyCode::BackTab);
        assert_eq!(home.focus(), HomeFocus::Lessons);
    }

    #[test]
    fn key_edits_report_changes() {
        let mut home = HomeScreen::new("", true);
        home.handle_key(KeyCode::Tab);
        assert_eq!(home.handle_key(KeyCode::Char('k')), HomeAction::ApiKeyChanged);
        assert_eq!(home.handle_key(KeyCode::Left), HomeAction::None);
        assert_eq!(home.api_key(), "k");
    }

    #[test]
    fn enter_extracts_from_input_fields_only() {
        let mut home = HomeScreen::new("", true);
        for c in " watch?v=abc ".chars() {
            home.handle_key(KeyCode::Char(c));
        }
        assert_eq!(home.url(), "watch?v=abc");
        assert_eq!(home.handle_key(KeyCode::Enter), HomeAction::Extract);

        home.handle_key(KeyCode::BackTab);
        assert_eq!(home.handle_key(KeyCode::Enter), HomeAction::None);
    }

    #[test]
    fn typing_j_in_url_field_does_not_scroll() {
        let mut home = HomeScreen::new("", true);
        home.handle_key(KeyCode::Char('j'));
        assert_eq!(home.url(), "j");
    }

    #[test]
    fn markdown_styling_keeps_text() {
        let lines = markdown_lines("## Overview\n  - point\nKey Topics:\nplain");
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["Overview", "  • point", "Key Topics:", "plain"]);
    }

    #[test]
    fn failure_status_shows_stage_and_cause() {
        let state = RunState::Finished(RunOutcome::FailedAtTranscript(
            LessonsError::TranscriptUnavailable {
                reason: "Transcripts are disabled for video abc".to_string(),
            },
        ));
        let texts: Vec<String> = status_lines(&state, true).iter().map(line_text).collect();
        assert_eq!(
            texts,
            vec![
                "Could not get the transcript.",
                "Transcripts are disabled for video abc"
            ]
        );
    }

    #[test]
    fn idle_status_asks_for_missing_key() {
        let texts: Vec<String> = status_lines(&RunState::Idle, false)
            .iter()
            .map(line_text)
            .collect();
        assert_eq!(texts, vec!["Enter your Gemini API key, then paste a YouTube URL."]);

        let texts: Vec<String> = status_lines(&RunState::Idle, true)
            .iter()
            .map(line_text)
            .collect();
        assert!(texts[0].starts_with("Paste a YouTube URL"));
    }
}
