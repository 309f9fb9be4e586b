//! studybuild-tui: Terminal UI for the studybuild panels
//!
//! This crate provides the interactive shell:
//! - Sidebar navigation between the Learning, Dev Tools and Knowledge panels
//! - Per-panel input, mode selection and markdown results
//! - Background generation requests that settle the panel they came from

mod app;
mod event;
mod screens;
#[cfg(test)]
pub mod test_utils;
mod text;
mod ui;

use screens::Screen as ScreenTrait;

pub use app::{App, Effect, PanelView};
pub use event::{key_to_action, Action, Event, EventHandler};
pub use studybuild_engine;

use arboard::Clipboard;
use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableBracketedPaste, EnableBracketedPaste, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    buffer::Buffer,
    layout::Rect,
    Terminal,
};
use std::io::stdout;
use studybuild_engine::{ModelAccess, PanelId, GENERATION_FAILED};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// A generation request running in the background for a panel.
type PendingRequest = (PanelId, JoinHandle<String>);

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            stdout(),
            DisableBracketedPaste,
            LeaveAlternateScreen,
            ShowCursor
        );
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop until the user quits, and
/// restores the terminal on exit.
pub async fn run_tui(
    access: ModelAccess,
    tick_rate_ms: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(access.model_name());
    let mut events = EventHandler::new(tick_rate_ms);
    info!(model = access.model_name(), "TUI started");

    let result = run_loop(&mut terminal, &mut app, &mut events, &access).await;

    terminal.show_cursor()?;

    result
}

async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut EventHandler,
    access: &ModelAccess,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut requests: Vec<PendingRequest> = Vec::new();
    let mut clipboard: Option<Clipboard> = None;

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            draw(app, area, frame.buffer_mut());
        })?;

        settle_finished(app, &mut requests).await;

        if app.should_quit {
            break;
        }

        let Some(event) = events.next().await else {
            break;
        };
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(effect) = app.handle_action(key_to_action(key)) {
                    perform(effect, app, access, &mut requests, &mut clipboard);
                }
            }
            Event::Paste(text) => app.paste(&text),
            Event::Tick => app.tick(),
            Event::Key(_) | Event::Resize(..) => {}
        }
    }

    for (panel, handle) in requests {
        warn!(panel = %panel, "Abandoning in-flight request on quit");
        handle.abort();
    }
    Ok(())
}

/// Render the whole frame.
fn draw(app: &App, area: Rect, buf: &mut Buffer) {
    screens::panel::PanelScreen.render(app, area, buf);

    if app.show_help {
        screens::render_help_overlay(area, buf);
    }
}

/// Carry out an effect the app asked for.
fn perform(
    effect: Effect,
    app: &mut App,
    access: &ModelAccess,
    requests: &mut Vec<PendingRequest>,
    clipboard: &mut Option<Clipboard>,
) {
    match effect {
        Effect::Dispatch(panel, request) => {
            let access = access.clone();
            let handle = tokio::spawn(async move { access.generate(&request).await });
            requests.push((panel, handle));
        }
        Effect::CopyToClipboard(text) => match copy_to_clipboard(clipboard, text) {
            Ok(()) => app.set_notification("Copied result to clipboard".to_string()),
            Err(e) => {
                warn!(error = %e, "Clipboard unavailable");
                app.set_notification(format!("Clipboard unavailable: {e}"));
            }
        },
    }
}

fn copy_to_clipboard(
    clipboard: &mut Option<Clipboard>,
    text: String,
) -> Result<(), arboard::Error> {
    if clipboard.is_none() {
        *clipboard = Some(Clipboard::new()?);
    }
    if let Some(board) = clipboard.as_mut() {
        board.set_text(text)?;
    }
    Ok(())
}

/// Settle every panel whose request has finished (non-blocking).
async fn settle_finished(app: &mut App, requests: &mut Vec<PendingRequest>) {
    let mut i = 0;
    while i < requests.len() {
        if !requests[i].1.is_finished() {
            i += 1;
            continue;
        }
        let (panel, handle) = requests.swap_remove(i);
        let text = match handle.await {
            Ok(text) => text,
            Err(e) => {
                error!(panel = %panel, error = %e, "Generation task failed");
                GENERATION_FAILED.to_string()
            }
        };
        app.settle(panel, text);
    }
}

/// Returns the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
