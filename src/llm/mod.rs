//! LLM module for yt-lessons
//!
//! Prompt rendering, the Gemini client and extraction of the model's
//! `<markdown>` payload.

mod client;
mod gemini;
mod payload;
mod prompts;

pub use client::{build_provider, LlmProvider};
pub use gemini::GeminiClient;
pub use payload::extract_payload;
pub use prompts::{
    check_template, render_prompt, TemplateIssue, DEFAULT_PROMPT, MARKDOWN_CLOSE, MARKDOWN_OPEN,
    TRANSCRIPT_PLACEHOLDER,
};
