//! Per-session state shared by the pipeline stages

use anyhow::Result;

use crate::config::Settings;
use crate::llm::DEFAULT_PROMPT;

/// Everything one user session remembers between extraction runs.
///
/// Lives as long as the TUI or CLI invocation that created it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Gemini credential as entered by the user
    pub api_key: String,

    /// Prompt template used for the next run
    pub custom_prompt: String,

    /// Transcript of the most recent fetch, `None` if it failed or never ran
    pub last_transcript: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(String::new(), DEFAULT_PROMPT.to_string())
    }
}

impl Session {
    pub fn new(api_key: String, custom_prompt: String) -> Self {
        Self {
            api_key,
            custom_prompt,
            last_transcript: None,
        }
    }

    /// Start a session from the configured key and template.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(
            settings.llm.api_key.trim().to_string(),
            settings.initial_prompt()?,
        ))
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    /// Replace the template used by later runs.
    pub fn save_prompt(&mut self, prompt: impl Into<String>) {
        self.custom_prompt = prompt.into();
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
