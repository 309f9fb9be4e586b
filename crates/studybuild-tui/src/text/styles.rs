//! Markdown styling configuration.

use ratatui::style::{Color, Modifier, Style};

use crate::ui::theme::Palette;

/// Styles for rendering markdown elements.
#[derive(Debug, Clone)]
pub struct MarkdownStyles {
    pub h1: Style,
    pub h2: Style,
    /// H3 and deeper.
    pub h3: Style,
    pub code: Style,
    pub code_block: Style,
    pub emphasis: Style,
    pub strong: Style,
    /// Bullets, numbers and checkboxes.
    pub list_marker: Style,
    pub link: Style,
    pub blockquote: Style,
    pub text: Style,
    pub strikethrough: Style,
    /// Table borders and horizontal rules.
    pub rule: Style,
    /// Raw HTML and link targets.
    pub muted: Style,
}

impl MarkdownStyles {
    /// Styles tinted with a panel's accent color.
    pub fn with_accent(accent: Color) -> Self {
        Self {
            h1: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            h2: Style::default()
                .fg(accent)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
            h3: Style::default()
                .fg(Palette::FG)
                .add_modifier(Modifier::BOLD),
            code: Style::default().fg(accent).bg(Palette::SURFACE),
            code_block: Style::default().fg(Palette::FG).bg(Palette::SURFACE),
            emphasis: Style::default().add_modifier(Modifier::ITALIC),
            strong: Style::default().add_modifier(Modifier::BOLD),
            list_marker: Style::default().fg(accent),
            link: Style::default()
                .fg(accent)
                .add_modifier(Modifier::UNDERLINED),
            blockquote: Style::default()
                .fg(Palette::DIM)
                .add_modifier(Modifier::ITALIC),
            text: Style::default().fg(Palette::FG),
            strikethrough: Style::default().add_modifier(Modifier::CROSSED_OUT),
            rule: Style::default().fg(Palette::BORDER),
            muted: Style::default().fg(Palette::DIM),
        }
    }
}

impl Default for MarkdownStyles {
    fn default() -> Self {
        Self::with_accent(Palette::INDIGO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_accent_tints_headings() {
        let styles = MarkdownStyles::with_accent(Palette::AMBER);
        assert_eq!(styles.h1.fg, Some(Palette::AMBER));
        assert!(styles.h1.add_modifier.contains(Modifier::BOLD));
        assert!(styles.emphasis.add_modifier.contains(Modifier::ITALIC));
    }
}
