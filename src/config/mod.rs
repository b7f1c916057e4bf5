//! Configuration module for yt-lessons
//!
//! Handles loading and managing application settings from TOML files.

mod settings;

pub use settings::{LlmSettings, Settings, TranscriptSettings, API_KEY_ENV};
