//! TUI widgets

mod help;
mod text_editor;
mod text_input;

pub use help::HelpPopup;
pub use text_editor::TextEditor;
pub use text_input::TextInput;
