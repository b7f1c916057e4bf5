//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::llm::DEFAULT_PROMPT;

/// Environment variable that fills an empty `llm.api_key`.
pub const API_KEY_ENV: &str = "YT_LESSONS_GEMINI_API_KEY";

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Caption fetching settings
    #[serde(default)]
    pub transcript: TranscriptSettings,

    /// LLM settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Prompt template settings
    #[serde(default)]
    pub prompt: PromptSettings,

    /// TUI settings
    #[serde(default)]
    pub tui: TuiSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSettings {
    /// Caption languages to try, in order of preference
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    /// YouTube base URL (empty = https://www.youtube.com)
    #[serde(default)]
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider (gemini)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// API key used when none is entered interactively
    #[serde(default)]
    pub api_key: String,

    /// Model name
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// API endpoint (empty = public Gemini endpoint)
    #[serde(default)]
    pub endpoint: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptSettings {
    /// Template file loaded as the initial prompt (empty = built-in prompt)
    #[serde(default)]
    pub template_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiSettings {
    /// Hide the API key while typing it
    #[serde(default = "default_true")]
    pub mask_api_key: bool,
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_languages() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_llm_provider() -> String {
    "gemini".to_string()
}

fn default_llm_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            endpoint: String::new(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_key: String::new(),
            model: default_llm_model(),
            endpoint: String::new(),
        }
    }
}

impl Default for TuiSettings {
    fn default() -> Self {
        Self { mask_api_key: true }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::debug!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let mut settings = Self::load_from(&config_path)?;
        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Parse a settings file without applying environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.fill_api_key(std::env::var(API_KEY_ENV).ok());
    }

    /// Use `key` only when no key is configured.
    fn fill_api_key(&mut self, key: Option<String>) {
        if !self.llm.api_key.trim().is_empty() {
            return;
        }

        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.llm.api_key = key;
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "yt-lessons", "yt-lessons")
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &Path) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Prompt template a new session starts with.
    pub fn initial_prompt(&self) -> Result<String> {
        let path = self.prompt.template_file.trim();
        if path.is_empty() {
            return Ok(DEFAULT_PROMPT.to_string());
        }

        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read prompt template: {}", path))
    }
}
