//! Application state for the studybuild TUI.

use crate::event::Action;
use crate::ui::widgets::TextInputState;
use studybuild_engine::{PanelEvent, PanelId, PanelState, PromptRequest};
use tracing::{debug, info};

/// Ticks a notification stays visible (about three seconds at 4 Hz).
const NOTIFICATION_TTL: usize = 12;

/// One feature panel as the TUI holds it.
#[derive(Debug, Clone)]
pub struct PanelView {
    /// Reducer state shared with the engine.
    pub state: PanelState,
    /// Editable buffer; every edit is mirrored into `state`.
    pub input: TextInputState,
    /// Lines scrolled past at the top of the result.
    pub scroll: u16,
}

impl PanelView {
    fn new(panel: PanelId) -> Self {
        Self {
            state: PanelState::new(panel),
            input: TextInputState::new(),
            scroll: 0,
        }
    }

    fn sync_input(&mut self) {
        self.state.update(PanelEvent::InputChanged(self.input.content().to_string()));
    }
}

/// Work the event loop must carry out on behalf of the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send this request for the panel and settle the panel with the reply.
    Dispatch(PanelId, PromptRequest),
    /// Put this text on the system clipboard.
    CopyToClipboard(String),
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    pub should_quit: bool,
    pub show_help: bool,
    /// Panel shown in the main area.
    pub active: PanelId,
    /// Indexed by [`PanelId::index`].
    pub panels: [PanelView; 3],
    /// Model named in the sidebar.
    pub model_name: String,
    /// Animation counter, advanced on every tick.
    pub tick: usize,
    pub notification: Option<String>,
    /// Ticks remaining until notification is cleared.
    notification_ttl: usize,
}

impl App {
    /// Create the app with every panel fresh and Learning active.
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            should_quit: false,
            show_help: false,
            active: PanelId::Learning,
            panels: PanelId::ALL.map(PanelView::new),
            model_name: model_name.into(),
            tick: 0,
            notification: None,
            notification_ttl: 0,
        }
    }

    /// App for tests, with a fixed model name.
    #[cfg(test)]
    pub fn new_for_test() -> Self {
        Self::new("gemini-2.5-flash")
    }

    pub fn panel(&self, panel: PanelId) -> &PanelView {
        &self.panels[panel.index()]
    }

    pub fn panel_mut(&mut self, panel: PanelId) -> &mut PanelView {
        &mut self.panels[panel.index()]
    }

    pub fn active_panel(&self) -> &PanelView {
        self.panel(self.active)
    }

    fn active_panel_mut(&mut self) -> &mut PanelView {
        self.panel_mut(self.active)
    }

    /// Whether any panel has a request in flight.
    pub fn any_busy(&self) -> bool {
        self.panels.iter().any(|p| p.state.is_busy())
    }

    /// Handle an action, returning work for the event loop if any.
    pub fn handle_action(&mut self, action: Action) -> Option<Effect> {
        if self.show_help {
            match action {
                Action::Help | Action::Back | Action::Quit => self.show_help = false,
                _ => {}
            }
            return None;
        }

        match action {
            Action::Quit => {
                info!("Quit requested");
                self.should_quit = true;
            }
            Action::Help => self.show_help = true,
            Action::SelectPanel(index) => {
                if let Some(panel) = PanelId::ALL.get(index) {
                    self.active = *panel;
                }
            }
            Action::NextMode | Action::PrevMode => {
                let view = self.active_panel_mut();
                let mode = view.state.mode();
                let next = if action == Action::NextMode {
                    mode.next()
                } else {
                    mode.prev()
                };
                view.state.update(PanelEvent::ModeSelected(next));
            }
            Action::Trigger => {
                let panel = self.active;
                let view = self.active_panel_mut();
                if let Some(request) = view.state.update(PanelEvent::Triggered) {
                    view.scroll = 0;
                    return Some(Effect::Dispatch(panel, request));
                }
            }
            Action::Insert(ch) => self.edit(|input| input.insert(ch)),
            Action::Newline => self.edit(|input| input.insert('\n')),
            Action::Backspace => self.edit(TextInputState::backspace),
            Action::Delete => self.edit(TextInputState::delete),
            Action::ClearInput => self.edit(TextInputState::clear),
            Action::Left => self.active_panel_mut().input.move_left(),
            Action::Right => self.active_panel_mut().input.move_right(),
            Action::Home => self.active_panel_mut().input.move_home(),
            Action::End => self.active_panel_mut().input.move_end(),
            Action::ScrollUp => {
                let view = self.active_panel_mut();
                view.scroll = view.scroll.saturating_sub(1);
            }
            Action::ScrollDown => {
                let view = self.active_panel_mut();
                view.scroll = view.scroll.saturating_add(1);
            }
            Action::CopyResult => {
                let result = self.active_panel().state.result();
                if result.is_empty() {
                    self.set_notification("Nothing to copy yet".to_string());
                } else {
                    return Some(Effect::CopyToClipboard(result.to_string()));
                }
            }
            Action::Back | Action::None => {}
        }
        None
    }

    fn edit(&mut self, f: impl FnOnce(&mut TextInputState)) {
        let view = self.active_panel_mut();
        f(&mut view.input);
        view.sync_input();
    }

    /// Insert pasted text into the active panel's input.
    pub fn paste(&mut self, text: &str) {
        if self.show_help {
            return;
        }
        self.edit(|input| input.insert_str(text));
    }

    /// Deliver the text a dispatched request settled with.
    pub fn settle(&mut self, panel: PanelId, text: String) {
        debug!(panel = %panel, len = text.len(), "Settling panel");
        let view = self.panel_mut(panel);
        view.state.update(PanelEvent::Settled(text));
    }

    /// Set a temporary notification message.
    pub fn set_notification(&mut self, msg: String) {
        self.notification = Some(msg);
        self.notification_ttl = NOTIFICATION_TTL;
    }

    /// Advance animations and expire notifications.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        if self.notification_ttl > 0 {
            self.notification_ttl -= 1;
            if self.notification_ttl == 0 {
                self.notification = None;
            }
        }
    }
}
