//! Screen definitions for the studybuild TUI.

pub mod panel;

use crate::app::App;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

/// Trait for screens that can be rendered.
pub trait Screen {
    /// Render the screen to the buffer.
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Render the help overlay.
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    use crate::ui::centered_fixed;
    use crate::ui::theme::{Palette, Styles};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph};

    let help_text = r"
  Panels
    F1 / F2 / F3      Learning, Dev Tools, Knowledge
    Alt+1..3          Same, where F-keys are taken
  Panel
    Tab / Shift+Tab   Next/prev mode
    Enter             Generate
    Ctrl+J            New line in input
    Ctrl+L            Clear input
    PgUp / PgDn       Scroll result
    Ctrl+Y            Copy result
  App
    F10               Toggle this help
    Ctrl+Q / Ctrl+C   Quit

  [Esc to close]
";

    let width = 56.min(area.width.saturating_sub(4));
    let height = 20.min(area.height.saturating_sub(2));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Help ")
        .title_style(Styles::title(Palette::INDIGO))
        .borders(Borders::ALL)
        .border_style(Styles::border_active(Palette::INDIGO))
        .style(Styles::default());

    Paragraph::new(help_text)
        .block(block)
        .style(Styles::default())
        .render(overlay_area, buf);
}
