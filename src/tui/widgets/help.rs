//! Help popup widget

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::tui::AppScreen;

const HOME_SHORTCUTS: &[(&str, &str)] = &[
    ("Enter", "Extract lessons from the URL"),
    ("Tab", "Next field (URL, API key, lessons)"),
    ("S-Tab", "Previous field"),
    ("↑/↓", "Scroll lessons"),
    ("PgUp/PgDn", "Page lessons"),
    ("F2", "Edit prompt template"),
    ("F1", "Show this help"),
    ("Esc", "Quit application"),
];

const PROMPT_SHORTCUTS: &[(&str, &str)] = &[
    ("Ctrl+S", "Save template for this session"),
    ("Ctrl+R", "Reset editor to the built-in template"),
    ("Arrows", "Move cursor"),
    ("PgUp/PgDn", "Move ten lines"),
    ("F1", "Show this help"),
    ("Esc", "Back to home (unsaved edits are dropped)"),
];

/// Help popup that shows keyboard shortcuts
pub struct HelpPopup;

impl HelpPopup {
    pub fn draw(frame: &mut Frame, area: Rect, screen: AppScreen) {
        // Centered, 60% width, 70% height
        let popup_width = (area.width as f32 * 0.6) as u16;
        let popup_height = (area.height as f32 * 0.7) as u16;
        let popup_area = Rect {
            x: (area.width - popup_width) / 2,
            y: (area.height - popup_height) / 2,
            width: popup_width,
            height: popup_height,
        };

        frame.render_widget(Clear, popup_area);

        let (title, shortcuts) = match screen {
            AppScreen::Home => ("Home Shortcuts", HOME_SHORTCUTS),
            AppScreen::Prompt => ("Prompt Shortcuts", PROMPT_SHORTCUTS),
        };

        let mut text = vec![
            Line::from(Span::styled(title, Style::default().fg(Color::Cyan).bold())),
            Line::from(""),
        ];
        text.extend(shortcuts.iter().map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{:<11}", key), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        }));
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            "Ctrl+C quits from anywhere. Press any key to close",
            Style::default().fg(Color::DarkGray),
        )));

        let help = Paragraph::new(text).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .style(Style::default().bg(Color::Black)),
        );

        frame.render_widget(help, popup_area);
    }
}
