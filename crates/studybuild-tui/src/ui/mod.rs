//! UI module for the studybuild TUI.

pub mod layout;
pub mod theme;
pub mod widgets;

pub use layout::*;
