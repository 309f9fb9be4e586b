//! Theme and styling definitions for the studybuild TUI.

use ratatui::style::{Color, Modifier, Style};
use studybuild_engine::PanelId;

/// Color palette for the TUI.
pub struct Palette;

impl Palette {
    // Base colors
    pub const BG: Color = Color::Rgb(15, 23, 42);
    pub const SURFACE: Color = Color::Rgb(30, 41, 59);
    pub const FG: Color = Color::Rgb(226, 232, 240);
    pub const DIM: Color = Color::Rgb(148, 163, 184);

    // Panel accents
    pub const INDIGO: Color = Color::Rgb(129, 140, 248);
    pub const EMERALD: Color = Color::Rgb(52, 211, 153);
    pub const AMBER: Color = Color::Rgb(251, 191, 36);

    // Status bar colors (high contrast)
    pub const STATUS_BG: Color = Color::Rgb(30, 41, 59);
    pub const STATUS_KEY_BG: Color = Color::Rgb(71, 85, 105);

    pub const ONLINE: Color = Color::Rgb(74, 222, 128);
    pub const ERROR: Color = Color::Rgb(248, 113, 113);

    pub const BORDER: Color = Color::Rgb(51, 65, 85);
}

/// Accent color of a panel.
pub fn accent(panel: PanelId) -> Color {
    match panel {
        PanelId::Learning => Palette::INDIGO,
        PanelId::DevTools => Palette::EMERALD,
        PanelId::Knowledge => Palette::AMBER,
    }
}

/// Indicator symbols (ASCII where the terminal may lack glyphs).
pub struct Symbols;

impl Symbols {
    pub const ONLINE: &'static str = "●";
    pub const SELECTED: &'static str = ">";
    pub const SPINNER: [&'static str; 4] = ["|", "/", "-", "\\"];
}

/// Spinner frame for a tick counter.
pub fn spinner_frame(tick: usize) -> &'static str {
    Symbols::SPINNER[tick % Symbols::SPINNER.len()]
}

/// Common styles used throughout the TUI.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::BG)
    }

    /// Dimmed text for secondary information.
    pub fn dim() -> Style {
        Style::default().fg(Palette::DIM).bg(Palette::BG)
    }

    /// Cursor and other focused markers.
    pub fn active() -> Style {
        Style::default()
            .fg(Palette::FG)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Sidebar background.
    pub fn sidebar() -> Style {
        Style::default().fg(Palette::DIM).bg(Palette::SURFACE)
    }

    /// Highlighted item in an accent color.
    pub fn highlight(accent: Color) -> Style {
        Style::default()
            .fg(accent)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Filled selection (dark text on the accent).
    pub fn selected(accent: Color) -> Style {
        Style::default()
            .fg(Palette::BG)
            .bg(accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Title style.
    pub fn title(accent: Color) -> Style {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    }

    /// Error status.
    pub fn error() -> Style {
        Style::default().fg(Palette::ERROR).bg(Palette::BG)
    }

    /// "Online" badge.
    pub fn online() -> Style {
        Style::default().fg(Palette::ONLINE).bg(Palette::BG)
    }

    /// Key hint style (for status bar) - bright on dark for visibility.
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Palette::FG)
            .bg(Palette::STATUS_KEY_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Key hint label style - readable on status bar background.
    pub fn key_label() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Status bar background style.
    pub fn status_bar() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Border style for inactive elements.
    pub fn border() -> Style {
        Style::default().fg(Palette::BORDER)
    }

    /// Border style for focused elements.
    pub fn border_active(accent: Color) -> Style {
        Style::default().fg(accent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_panel_has_its_own_accent() {
        let accents: Vec<Color> = PanelId::ALL.iter().map(|p| accent(*p)).collect();
        assert_ne!(accents[0], accents[1]);
        assert_ne!(accents[1], accents[2]);
        assert_ne!(accents[0], accents[2]);
    }

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(spinner_frame(0), "|");
        assert_eq!(spinner_frame(5), "/");
    }
}
