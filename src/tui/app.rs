//! Main TUI application state and logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use crate::config::Settings;
use crate::pipeline::{LessonsPipeline, RunOutcome, Session};
use crate::tui::screens::{HomeAction, HomeScreen, PromptScreen};
use crate::tui::widgets::HelpPopup;

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Home,
    Prompt,
}

/// Progress of the extraction run started from the home screen.
///
/// Each busy state is advanced by one `App::update` call, so the screen is
/// redrawn between the transcript fetch and the model call.
#[derive(Debug, Default)]
pub enum RunState {
    #[default]
    Idle,
    FetchingTranscript {
        url: String,
    },
    ExtractingLessons {
        transcript: String,
    },
    Finished(RunOutcome),
}

impl RunState {
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Self::FetchingTranscript { .. } | Self::ExtractingLessons { .. }
        )
    }
}

/// Main application state
pub struct App {
    current_screen: AppScreen,
    show_help: bool,
    quit: bool,

    session: Session,
    pipeline: LessonsPipeline,
    run_state: RunState,

    // Screen states
    home: HomeScreen,
    prompt: PromptScreen,
    prompt_status: Option<String>,
}

impl App {
    /// Create a new app instance
    pub fn new(settings: Settings) -> Result<Self> {
        let session = Session::from_settings(&settings)?;
        let pipeline = LessonsPipeline::from_settings(&settings)?;
        Ok(Self::with_pipeline(&settings, session, pipeline))
    }

    /// Create an app around an existing session and pipeline
    pub fn with_pipeline(settings: &Settings, session: Session, pipeline: LessonsPipeline) -> Self {
        Self {
            current_screen: AppScreen::Home,
            show_help: false,
            quit: false,
            home: HomeScreen::new(&session.api_key, settings.tui.mask_api_key),
            prompt: PromptScreen::new(&session.custom_prompt),
            prompt_status: None,
            session,
            pipeline,
            run_state: RunState::Idle,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_screen(&self) -> AppScreen {
        self.current_screen
    }

    pub fn run_state(&self) -> &RunState {
        &self.run_state
    }

    pub fn home(&self) -> &HomeScreen {
        &self.home
    }

    pub fn prompt(&self) -> &PromptScreen {
        &self.prompt
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// True while an extraction run still has stages left.
    pub fn is_busy(&self) -> bool {
        self.run_state.is_busy()
    }

    /// Draw the current screen
    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.size();

        match self.current_screen {
            AppScreen::Home => {
                self.home.draw(frame, area, &self.run_state, self.session.has_api_key());
            }
            AppScreen::Prompt => {
                self.prompt.draw(frame, area, self.prompt_status.as_deref());
            }
        }

        // Draw help popup if active
        if self.show_help {
            HelpPopup::draw(frame, area, self.current_screen);
        }
    }

    /// Handle key input
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            self.quit = true;
            return Ok(());
        }

        if self.show_help {
            self.show_help = false;
            return Ok(());
        }

        if key.code == KeyCode::F(1) {
            self.show_help = true;
            return Ok(());
        }

        match self.current_screen {
            AppScreen::Home => self.handle_home_key(key.code, ctrl),
            AppScreen::Prompt => self.handle_prompt_key(key.code, ctrl),
        }

        Ok(())
    }

    /// Handle home screen key input
    fn handle_home_key(&mut self, key: KeyCode, ctrl: bool) {
        match key {
            KeyCode::Esc => {
                self.quit = true;
            }
            KeyCode::F(2) => {
                self.open_prompt();
            }
            KeyCode::Char('p') if ctrl => {
                self.open_prompt();
            }
            _ if ctrl => {}
            _ => match self.home.handle_key(key) {
                HomeAction::Extract => self.start_run(),
                HomeAction::ApiKeyChanged => {
                    self.session.set_api_key(self.home.api_key().trim());
                }
                HomeAction::None => {}
            },
        }
    }

    /// Handle prompt screen key input
    fn handle_prompt_key(&mut self, key: KeyCode, ctrl: bool) {
        self.prompt_status = None;

        match key {
            KeyCode::Esc => {
                self.current_screen = AppScreen::Home;
            }
            KeyCode::Char('s') if ctrl => {
                self.save_prompt();
            }
            KeyCode::Char('r') if ctrl => {
                self.prompt.reset_to_default();
            }
            _ if ctrl => {}
            _ => {
                self.prompt.handle_key(key);
            }
        }
    }

    /// Show the editor loaded with the session's current template
    fn open_prompt(&mut self) {
        self.prompt.load(&self.session.custom_prompt);
        self.prompt_status = None;
        self.current_screen = AppScreen::Prompt;
    }

    fn save_prompt(&mut self) {
        self.session.save_prompt(self.prompt.text());
        self.prompt.mark_saved();
        self.prompt_status = Some("Prompt saved!".to_string());
        tracing::info!(chars = self.session.custom_prompt.len(), "Prompt template saved");
    }

    fn start_run(&mut self) {
        if self.run_state.is_busy() {
            return;
        }

        self.home.set_lessons(None);
        self.run_state = RunState::FetchingTranscript {
            url: self.home.url().to_string(),
        };
    }

    /// Advance the extraction run by one stage
    pub async fn update(&mut self) -> Result<()> {
        self.run_state = match std::mem::take(&mut self.run_state) {
            RunState::FetchingTranscript { url } => {
                match self.pipeline.fetch_transcript(&mut self.session, &url).await {
                    Ok(transcript) => RunState::ExtractingLessons { transcript },
                    Err(e) => RunState::Finished(RunOutcome::FailedAtTranscript(e)),
                }
            }
            RunState::ExtractingLessons { transcript } => {
                match self.pipeline.extract_lessons(&self.session, &transcript).await {
                    Ok(lessons) => {
                        self.home.set_lessons(Some(lessons.clone()));
                        RunState::Finished(RunOutcome::Success(lessons))
                    }
                    Err(e) => RunState::Finished(RunOutcome::FailedAtExtraction(e)),
                }
            }
            other => other,
        };

        Ok(())
    }
}
