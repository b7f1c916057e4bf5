//! Pipeline module for yt-lessons
//!
//! Session state and the staged URL → transcript → lessons run.

mod runner;
mod session;

pub use runner::{LessonsPipeline, RunOutcome};
pub use session::Session;
