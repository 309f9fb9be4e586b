//! Reusable widgets for the studybuild TUI.

pub mod mode_bar;
pub mod status_bar;
pub mod text_input;

pub use mode_bar::ModeBar;
pub use status_bar::{KeyHint, StatusBar};
pub use text_input::TextInputState;
