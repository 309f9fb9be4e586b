//! Event handling for the studybuild TUI.

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Text was pasted (bracketed paste).
    Paste(String),
    /// A tick event for UI updates.
    Tick,
    /// Terminal was resized.
    Resize(u16, u16),
}

/// Event handler that runs in a background thread.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate.
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let tx_clone = tx.clone();

        // crossterm polling is blocking, so it gets its own thread
        std::thread::spawn(move || {
            let tick_rate = Duration::from_millis(tick_rate_ms);
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let event = match evt {
                            CrosstermEvent::Key(key) => Some(Event::Key(key)),
                            CrosstermEvent::Paste(text) => Some(Event::Paste(text)),
                            CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
                            _ => None,
                        };
                        if let Some(e) = event {
                            if tx_clone.send(e).is_err() {
                                break;
                            }
                        }
                    }
                } else if tx_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Get the next event, waiting until one is available.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Help,
    Back,
    /// Press the active panel's trigger button.
    Trigger,
    NextMode,
    PrevMode,
    /// Switch to the panel at this sidebar index.
    SelectPanel(usize),
    Insert(char),
    Newline,
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    ClearInput,
    ScrollUp,
    ScrollDown,
    CopyResult,
    None,
}

/// Convert a key event to an action.
///
/// Printable keys always edit the input, so every command sits on a
/// modifier, a function key, or a navigation key.
pub fn key_to_action(key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    if ctrl {
        return match key.code {
            KeyCode::Char('c' | 'q') => Action::Quit,
            KeyCode::Char('j') | KeyCode::Enter => Action::Newline,
            KeyCode::Char('l') => Action::ClearInput,
            KeyCode::Char('y') => Action::CopyResult,
            _ => Action::None,
        };
    }

    if alt {
        return match key.code {
            KeyCode::Char('1') => Action::SelectPanel(0),
            KeyCode::Char('2') => Action::SelectPanel(1),
            KeyCode::Char('3') => Action::SelectPanel(2),
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::F(1) => Action::SelectPanel(0),
        KeyCode::F(2) => Action::SelectPanel(1),
        KeyCode::F(3) => Action::SelectPanel(2),
        KeyCode::F(10) => Action::Help,
        KeyCode::Esc => Action::Back,
        KeyCode::Enter => Action::Trigger,
        KeyCode::Tab => Action::NextMode,
        KeyCode::BackTab => Action::PrevMode,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Delete => Action::Delete,
        KeyCode::Left => Action::Left,
        KeyCode::Right => Action::Right,
        KeyCode::Home => Action::Home,
        KeyCode::End => Action::End,
        KeyCode::Up | KeyCode::PageUp => Action::ScrollUp,
        KeyCode::Down | KeyCode::PageDown => Action::ScrollDown,
        KeyCode::Char(c) => Action::Insert(c),
        _ => Action::None,
    }
}
