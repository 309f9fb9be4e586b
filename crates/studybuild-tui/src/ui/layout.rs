//! Layout helpers for the studybuild TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the navigation sidebar.
pub const SIDEBAR_WIDTH: u16 = 24;

/// Regions of the application shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellAreas {
    pub sidebar: Rect,
    pub header: Rect,
    pub body: Rect,
    pub status: Rect,
}

/// Split the screen into sidebar, header, body and status bar.
///
/// The sidebar collapses on narrow terminals.
pub fn shell_layout(area: Rect) -> ShellAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let sidebar_width = if area.width >= SIDEBAR_WIDTH * 3 {
        SIDEBAR_WIDTH
    } else {
        0
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(10)])
        .split(rows[0]);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(2)])
        .split(columns[1]);

    ShellAreas {
        sidebar: columns[0],
        header: main[0],
        body: main[1],
        status: rows[1],
    }
}

/// Create a centered rect with fixed dimensions.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_layout_wide() {
        let areas = shell_layout(Rect::new(0, 0, 100, 30));
        assert_eq!(areas.sidebar.width, SIDEBAR_WIDTH);
        assert_eq!(areas.status.y, 29);
        assert_eq!(areas.header.height, 1);
        assert_eq!(areas.body.x, SIDEBAR_WIDTH);
    }

    #[test]
    fn test_shell_layout_narrow_hides_sidebar() {
        let areas = shell_layout(Rect::new(0, 0, 60, 20));
        assert_eq!(areas.sidebar.width, 0);
        assert_eq!(areas.body.width, 60);
    }

    #[test]
    fn test_centered_fixed_clamps() {
        let r = centered_fixed(100, 50, Rect::new(0, 0, 40, 10));
        assert_eq!(r.width, 40);
        assert_eq!(r.height, 10);
    }
}
