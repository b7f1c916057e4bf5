//! TUI screens

mod home;
mod prompt;

pub use home::{HomeAction, HomeFocus, HomeScreen};
pub use prompt::PromptScreen;
