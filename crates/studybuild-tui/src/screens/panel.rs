//! The application shell and the active feature panel.
//!
//! ```text
//! ┌ sidebar ──────┬ header: panel title ............ ● Online ┐
//! │ > F1 Learning │ description                               │
//! │   F2 Dev Tools│ input label                               │
//! │   F3 Knowledge│ ┌ input ───────────────────────────────┐  │
//! │               │ └──────────────────────────────────────┘  │
//! │               │ mode buttons                              │
//! │               │ action / busy spinner                     │
//! │ Powered by    │ ┌ Result ──────────────────────────────┐  │
//! │ <model>       │ └──────────────────────────────────────┘  │
//! └ status bar ───────────────────────────────────────────────┘
//! ```

use super::Screen;
use crate::app::{App, PanelView};
use crate::text::{render_markdown, wrap_lines, MarkdownStyles};
use crate::ui::theme::{accent, spinner_frame, Palette, Styles, Symbols};
use crate::ui::widgets::{KeyHint, ModeBar, StatusBar};
use crate::ui::{shell_layout, SIDEBAR_WIDTH};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Widget},
};
use studybuild_engine::{PanelId, GENERATION_FAILED};

/// Rows of the input box, borders included.
const INPUT_HEIGHT: u16 = 7;

/// The only screen: sidebar, header, active panel and status bar.
pub struct PanelScreen;

impl Screen for PanelScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        Block::default().style(Styles::default()).render(area, buf);

        let areas = shell_layout(area);
        render_sidebar(app, areas.sidebar, buf);
        render_header(app, areas.header, buf);
        render_body(app, areas.body, buf);
        render_status(app, areas.status, buf);
    }
}

fn render_sidebar(app: &App, area: Rect, buf: &mut Buffer) {
    if area.width == 0 {
        return;
    }

    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Styles::border())
        .style(Styles::sidebar());
    let inner = block.inner(area);
    block.render(area, buf);

    let mut lines = vec![
        Line::from(Span::styled(" studybuild", Styles::title(Palette::FG))),
        Line::default(),
    ];
    for (i, panel) in PanelId::ALL.iter().enumerate() {
        let view = app.panel(*panel);
        let selected = *panel == app.active;
        let marker = if selected { Symbols::SELECTED } else { " " };
        let style = if selected {
            Styles::title(accent(*panel))
        } else {
            Styles::sidebar()
        };
        let label = format!(" {marker} F{} {}", i + 1, panel.info().nav_label);
        let mut spans = vec![Span::styled(label, style)];
        if view.state.is_busy() {
            spans.push(Span::styled(
                format!(" {}", spinner_frame(app.tick)),
                Styles::title(accent(*panel)),
            ));
        }
        lines.push(Line::from(spans));
    }
    Paragraph::new(lines)
        .style(Styles::sidebar())
        .render(inner, buf);

    // Footer pinned to the bottom of the sidebar
    if inner.height >= 7 {
        let footer = Rect::new(inner.x, inner.y + inner.height - 2, inner.width, 2);
        let model = Span::styled(format!(" {}", app.model_name), Styles::title(Palette::FG));
        Paragraph::new(vec![Line::from(" Powered by"), Line::from(model)])
            .style(Styles::sidebar())
            .render(footer, buf);
    }
}

fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    let info = app.active.info();
    let color = accent(app.active);
    let title = Span::styled(format!(" {}", info.title), Styles::title(color));
    buf.set_line(area.x, area.y, &Line::from(title), area.width);

    let badge = format!("{} Online ", Symbols::ONLINE);
    let badge_width = u16::try_from(badge.chars().count()).unwrap_or(u16::MAX);
    if badge_width < area.width {
        buf.set_string(
            area.x + area.width - badge_width,
            area.y,
            &badge,
            Styles::online(),
        );
    }
}

fn render_body(app: &App, area: Rect, buf: &mut Buffer) {
    let panel = app.active;
    let info = panel.info();
    let color = accent(panel);
    let view = app.active_panel();

    let padded = Block::default().padding(Padding::horizontal(1));
    let inner = padded.inner(area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // description
            Constraint::Length(1),
            Constraint::Length(1), // input label
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(1), // modes
            Constraint::Length(1), // action
            Constraint::Length(1),
            Constraint::Min(0), // result
        ])
        .split(inner);

    Paragraph::new(info.description)
        .style(Styles::dim())
        .render(chunks[0], buf);
    Paragraph::new(info.input_label)
        .style(Styles::default())
        .render(chunks[2], buf);

    view.input
        .widget()
        .placeholder(info.placeholder)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_active(color)),
        )
        .render(chunks[3], buf);

    ModeBar::new(panel.modes(), view.state.mode(), color).render(chunks[4], buf);
    render_action(app, view, color, chunks[5], buf);

    if !view.state.result().is_empty() {
        render_result(view, color, chunks[7], buf);
    }
}

fn render_action(app: &App, view: &PanelView, color: Color, area: Rect, buf: &mut Buffer) {
    let info = view.state.panel().info();
    let line = if view.state.is_busy() {
        Line::from(Span::styled(
            format!("{} {}", spinner_frame(app.tick), info.busy_label),
            Styles::highlight(color),
        ))
    } else if view.state.can_trigger() {
        Line::from(vec![
            Span::styled(" Enter ", Styles::selected(color)),
            Span::styled(format!(" {}", info.action_label), Styles::highlight(color)),
        ])
    } else {
        Line::from(vec![
            Span::styled(" Enter ", Styles::key_label()),
            Span::styled(format!(" {}", info.action_label), Styles::dim()),
        ])
    };
    buf.set_line(area.x, area.y, &line, area.width);
}

fn render_result(view: &PanelView, color: Color, area: Rect, buf: &mut Buffer) {
    if area.height < 3 {
        return;
    }

    let block = Block::default()
        .title(" Result ")
        .title_style(Styles::title(color))
        .borders(Borders::ALL)
        .border_style(Styles::border());
    let inner = block.inner(area);
    block.render(area, buf);

    let width = usize::from(inner.width);
    let result = view.state.result();
    let lines = if result == GENERATION_FAILED {
        let error = Span::styled(result.to_string(), Styles::error());
        vec![Line::from(error)]
    } else {
        render_markdown(result, width, &MarkdownStyles::with_accent(color))
    };
    let lines = wrap_lines(lines, width);

    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let scroll = view.scroll.min(total.saturating_sub(inner.height));
    Paragraph::new(lines)
        .style(Styles::default())
        .scroll((scroll, 0))
        .render(inner, buf);
}

fn render_status(app: &App, area: Rect, buf: &mut Buffer) {
    let info = app.active.info();
    let hints = vec![
        KeyHint::new("Enter", info.action_label),
        KeyHint::new("Tab", "Mode"),
        KeyHint::new("F10", "Help"),
    ];
    let color = accent(app.active);
    let mut bar = StatusBar::new(info.nav_label, color).hints(hints);
    if let Some(msg) = &app.notification {
        bar = bar.right(msg);
    } else if area.width > SIDEBAR_WIDTH * 3 {
        bar = bar.right("Ctrl+Q quit");
    }
    bar.render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Action;
    use crate::test_utils::{render_screen_to_string, render_screen_to_string_sized};

    fn type_text(app: &mut App, text: &str) {
        app.paste(text);
    }

    #[test]
    fn test_shell_shows_navigation_and_model() {
        let app = App::new_for_test();
        let screen = render_screen_to_string(&PanelScreen, &app);

        assert!(screen.contains("Learning Assistant"));
        assert!(screen.contains("Online"));
        assert!(screen.contains("F1 Learning"));
        assert!(screen.contains("F2 Dev Tools"));
        assert!(screen.contains("F3 Knowledge"));
        assert!(screen.contains("Powered by"));
        assert!(screen.contains("gemini-2.5-flash"));
    }

    #[test]
    fn test_empty_panel_shows_placeholder_and_no_result() {
        let app = App::new_for_test();
        let screen = render_screen_to_string_sized(&PanelScreen, &app, 120, 30);

        assert!(screen.contains("What do you want to learn?"));
        assert!(screen.contains("e.g., Explain Quantum Computing"));
        assert!(screen.contains("ELI5 (Simple)"));
        assert!(screen.contains("Generate"));
        assert!(!screen.contains("Result"));
    }

    #[test]
    fn test_busy_panel_shows_busy_label() {
        let mut app = App::new_for_test();
        app.handle_action(Action::SelectPanel(1));
        type_text(&mut app, "fn main() {}");
        app.handle_action(Action::Trigger);

        let screen = render_screen_to_string_sized(&PanelScreen, &app, 120, 30);
        assert!(screen.contains("Developer Tools"));
        assert!(screen.contains("| Analyzing..."));
    }

    #[test]
    fn test_settled_result_is_rendered_as_markdown() {
        let mut app = App::new_for_test();
        app.handle_action(Action::SelectPanel(2));
        type_text(&mut app, "notes");
        app.handle_action(Action::Trigger);
        app.settle(
            PanelId::Knowledge,
            "## Flashcards\n\n- **Q:** What is ATP?".to_string(),
        );

        let screen = render_screen_to_string_sized(&PanelScreen, &app, 120, 30);
        assert!(screen.contains("Result"));
        assert!(screen.contains("Flashcards"));
        assert!(screen.contains("• Q: What is ATP?"));
        assert!(!screen.contains("**"));
    }

    #[test]
    fn test_failure_text_is_shown() {
        let mut app = App::new_for_test();
        type_text(&mut app, "x");
        app.handle_action(Action::Trigger);
        app.settle(PanelId::Learning, GENERATION_FAILED.to_string());

        let screen = render_screen_to_string_sized(&PanelScreen, &app, 120, 30);
        assert!(screen.contains("Error generating content."));
    }

    #[test]
    fn test_background_busy_panel_spins_in_sidebar() {
        let mut app = App::new_for_test();
        type_text(&mut app, "x");
        app.handle_action(Action::Trigger);
        app.handle_action(Action::SelectPanel(2));

        let screen = render_screen_to_string(&PanelScreen, &app);
        assert!(screen.contains("F1 Learning |"));
        assert!(screen.contains("Knowledge Organizer"));
    }

    #[test]
    fn test_notification_in_status_bar() {
        let mut app = App::new_for_test();
        app.handle_action(Action::CopyResult);
        let screen = render_screen_to_string(&PanelScreen, &app);
        assert!(screen.contains("Nothing to copy yet"));
    }

    #[test]
    fn test_narrow_terminal_hides_sidebar() {
        let app = App::new_for_test();
        let screen = render_screen_to_string_sized(&PanelScreen, &app, 60, 24);
        assert!(!screen.contains("Powered by"));
        assert!(screen.contains("Learning Assistant"));
    }
}
