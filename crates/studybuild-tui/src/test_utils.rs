//! Test utilities for rendering screens into plain text.

use crate::app::App;
use crate::screens::Screen;
use async_trait::async_trait;
use ratatui::{buffer::Buffer, layout::Rect};
use studybuild_engine::{GenerationBackend, GenerationError};

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Convert a buffer to text, one row per line with trailing spaces trimmed.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut rows = Vec::with_capacity(usize::from(area.height));

    for y in area.y..area.y + area.height {
        let mut row = String::new();
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                row.push_str(cell.symbol());
            }
        }
        rows.push(row.trim_end().to_string());
    }

    rows.join("\n")
}

/// Render a screen at the default test size and return it as text.
pub fn render_screen_to_string<S: Screen>(screen: &S, app: &App) -> String {
    render_screen_to_string_sized(screen, app, TEST_WIDTH, TEST_HEIGHT)
}

/// Render a screen at a custom size and return it as text.
pub fn render_screen_to_string_sized<S: Screen>(
    screen: &S,
    app: &App,
    width: u16,
    height: u16,
) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    screen.render(app, area, &mut buffer);
    buffer_to_string(&buffer)
}

/// Stateless backend with a fixed behavior.
pub enum ScriptedBackend {
    /// Always answer with this text.
    Reply(String),
    /// Answer with the prompt it was sent.
    Echo,
    /// Always fail with an API error.
    Fail,
}

impl ScriptedBackend {
    pub fn replying(text: &str) -> Self {
        Self::Reply(text.to_string())
    }

    pub fn echoing() -> Self {
        Self::Echo
    }

    pub fn failing() -> Self {
        Self::Fail
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    async fn generate(
        &self,
        prompt: &str,
        _context: &str,
    ) -> Result<Option<String>, GenerationError> {
        match self {
            Self::Reply(text) => Ok(Some(text.clone())),
            Self::Echo => Ok(Some(prompt.to_string())),
            Self::Fail => Err(GenerationError::Api {
                status: 500,
                message: "backend unavailable".to_string(),
            }),
        }
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    #[test]
    fn test_buffer_to_string_trims_rows() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", Style::default());
        buffer.set_string(0, 2, "World", Style::default());

        assert_eq!(buffer_to_string(&buffer), "Hello\n\nWorld");
    }
}
