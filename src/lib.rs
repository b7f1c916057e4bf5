//! yt-lessons - Turn YouTube video transcripts into structured lessons
//!
//! Fetches a video's captions, feeds them through a Gemini prompt and shows the
//! markdown the model wraps in `<markdown>` tags.

pub mod cli;
pub mod config;
pub mod llm;
pub mod pipeline;
pub mod tui;
pub mod youtube;

use thiserror::Error;

/// Main error type for yt-lessons
///
/// Each variant belongs to one pipeline stage. The display text is what the
/// user sees; the underlying cause is kept in `reason` for logs and verbose
/// output.
#[derive(Error, Debug)]
pub enum LessonsError {
    #[error("Could not parse a video id from URL: {0}")]
    InvalidUrl(String),

    #[error("Could not get the transcript.")]
    TranscriptUnavailable { reason: String },

    #[error("API call failed.")]
    GenerationFailed { reason: String },

    #[error("Could not extract the lessons.")]
    PayloadMissing,
}

impl LessonsError {
    /// Underlying cause, when the stage recorded one.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::TranscriptUnavailable { reason } | Self::GenerationFailed { reason } => {
                Some(reason)
            }
            Self::InvalidUrl(_) | Self::PayloadMissing => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LessonsError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "yt-lessons";
