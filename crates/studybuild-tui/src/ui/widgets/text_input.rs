//! Multi-line text input widget.

use crate::ui::theme::Styles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

/// A multi-line text input widget.
#[derive(Debug, Clone)]
pub struct TextInput<'a> {
    /// The text content.
    content: &'a str,
    /// Cursor position (character index).
    cursor: usize,
    /// Optional block for borders/title.
    block: Option<Block<'a>>,
    /// Placeholder text.
    placeholder: Option<&'a str>,
}

impl<'a> TextInput<'a> {
    /// Create a new text input over borrowed content.
    pub fn new(content: &'a str, cursor: usize) -> Self {
        Self {
            content,
            cursor,
            block: None,
            placeholder: None,
        }
    }

    /// Set the block for the text input.
    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Set placeholder text.
    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner.height < 1 || inner.width < 1 {
            return;
        }

        if self.content.is_empty() {
            let mut spans = vec![Span::styled("_", Styles::active())];
            if let Some(placeholder) = self.placeholder {
                spans.push(Span::styled(placeholder, Styles::dim()));
            }
            Paragraph::new(Line::from(spans)).render(inner, buf);
            return;
        }

        // Build lines, marking the cursor with '|' inside text and '_' at line ends
        let mut lines: Vec<String> = vec![String::new()];
        let mut cursor_line = 0;
        for (i, ch) in self.content.chars().enumerate() {
            if i == self.cursor {
                cursor_line = lines.len() - 1;
                let marker = if ch == '\n' { '_' } else { '|' };
                if let Some(last) = lines.last_mut() {
                    last.push(marker);
                }
            }
            if ch == '\n' {
                lines.push(String::new());
            } else if let Some(last) = lines.last_mut() {
                last.push(ch);
            }
        }
        if self.cursor >= self.content.chars().count() {
            cursor_line = lines.len() - 1;
            if let Some(last) = lines.last_mut() {
                last.push('_');
            }
        }

        // Keep the cursor line in view
        let height = usize::from(inner.height);
        let skip = (cursor_line + 1).saturating_sub(height);

        let visible: Vec<Line<'_>> = lines
            .into_iter()
            .skip(skip)
            .take(height)
            .map(|l| Line::from(Span::styled(l, Styles::default())))
            .collect();
        Paragraph::new(visible)
            .style(Styles::default())
            .render(inner, buf);
    }
}

/// State for a text input, managing content and cursor position.
///
/// The cursor counts characters, not bytes.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    content: String,
    cursor: usize,
}

impl TextInputState {
    /// Create a new empty text input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    fn len_chars(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_idx)
            .map_or(self.content.len(), |(i, _)| i)
    }

    /// Clear the content.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        let at = self.byte_offset(self.cursor);
        self.content.insert(at, ch);
        self.cursor += 1;
    }

    /// Insert a string at the cursor position. Carriage returns are dropped.
    pub fn insert_str(&mut self, s: &str) {
        let cleaned: String = s.chars().filter(|c| *c != '\r').collect();
        let at = self.byte_offset(self.cursor);
        self.content.insert_str(at, &cleaned);
        self.cursor += cleaned.chars().count();
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete the character at the cursor (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.len_chars() {
            let at = self.byte_offset(self.cursor);
            self.content.remove(at);
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.len_chars() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.len_chars();
    }

    /// Create a widget from this state.
    pub fn widget(&self) -> TextInput<'_> {
        TextInput::new(&self.content, self.cursor)
    }
}
