//! Text rendering utilities.
//!
//! - [`render_markdown`] turns model output into styled ratatui Lines
//! - [`wrap_lines`] fits those lines to a width

mod markdown;
mod styles;
mod wrap;

pub use markdown::render_markdown;
pub use styles::MarkdownStyles;
pub use wrap::wrap_lines;
#[cfg(test)]
pub use wrap::line_text;
