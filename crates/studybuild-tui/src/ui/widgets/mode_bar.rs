//! Mode selector widget.

use crate::ui::theme::Styles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    text::{Line, Span},
    widgets::Widget,
};
use studybuild_engine::Mode;

/// A horizontal row of mode buttons with the selected one filled.
#[derive(Debug, Clone)]
pub struct ModeBar<'a> {
    modes: &'a [Mode],
    selected: Mode,
    accent: Color,
}

impl<'a> ModeBar<'a> {
    /// Create a mode bar over a panel's modes.
    pub fn new(modes: &'a [Mode], selected: Mode, accent: Color) -> Self {
        Self {
            modes,
            selected,
            accent,
        }
    }
}

impl Widget for ModeBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let mut spans = Vec::new();
        for (i, mode) in self.modes.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" ", Styles::default()));
            }
            let style = if *mode == self.selected {
                Styles::selected(self.accent)
            } else {
                Styles::dim()
            };
            spans.push(Span::styled(format!(" {} ", mode.label()), style));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
