//! Per-panel state and its reducer.
//!
//! A panel owns its input text, selected mode, busy flag and last result.
//! All changes go through [`PanelState::apply`] (or [`PanelState::update`] in
//! place), so every transition can be tested without a UI.

use crate::client::ModelAccess;
use crate::templates::{build_request, Mode, PanelId, PromptRequest};
use tracing::{debug, warn};

/// Where a panel is in its request cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Idle with empty input; the trigger is disabled.
    Empty,
    /// Idle with input; the trigger is enabled.
    Ready,
    /// A request is in flight.
    Busy,
}

/// Input to the panel reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// The input text was replaced.
    InputChanged(String),
    /// A mode button was pressed.
    ModeSelected(Mode),
    /// The trigger button was pressed.
    Triggered,
    /// The outstanding request settled with display text.
    Settled(String),
}

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State after the event.
    pub state: PanelState,
    /// Request the caller must send, if the event started one.
    pub dispatch: Option<PromptRequest>,
}

/// State of one feature panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    panel: PanelId,
    input: String,
    mode: Mode,
    busy: bool,
    result: String,
}

impl PanelState {
    /// Fresh panel: empty input, default mode, no result.
    pub fn new(panel: PanelId) -> Self {
        Self {
            panel,
            input: String::new(),
            mode: panel.default_mode(),
            busy: false,
            result: String::new(),
        }
    }

    pub fn panel(&self) -> PanelId {
        self.panel
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Last settled text, empty until the first request completes.
    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn phase(&self) -> Phase {
        if self.busy {
            Phase::Busy
        } else if self.input.is_empty() {
            Phase::Empty
        } else {
            Phase::Ready
        }
    }

    /// Whether a trigger would start a request.
    pub fn can_trigger(&self) -> bool {
        self.phase() == Phase::Ready
    }

    /// The request a trigger would send right now.
    pub fn pending_request(&self) -> PromptRequest {
        build_request(self.mode, &self.input)
    }

    /// Pure reducer: consume the state and return the next one.
    pub fn apply(mut self, event: PanelEvent) -> Transition {
        let dispatch = self.update(event);
        Transition {
            state: self,
            dispatch,
        }
    }

    /// Apply an event in place, returning the request to send, if any.
    pub fn update(&mut self, event: PanelEvent) -> Option<PromptRequest> {
        match event {
            PanelEvent::InputChanged(text) => {
                self.input = text;
                None
            }
            PanelEvent::ModeSelected(mode) => {
                if mode.panel() == self.panel {
                    self.mode = mode;
                } else {
                    warn!(panel = %self.panel, %mode, "Ignoring mode from another panel");
                }
                None
            }
            PanelEvent::Triggered => {
                if !self.can_trigger() {
                    debug!(panel = %self.panel, phase = ?self.phase(), "Trigger ignored");
                    return None;
                }
                self.busy = true;
                debug!(panel = %self.panel, mode = %self.mode, "Request dispatched");
                Some(self.pending_request())
            }
            PanelEvent::Settled(text) => {
                if self.busy {
                    self.result = text;
                    self.busy = false;
                    debug!(panel = %self.panel, "Request settled");
                } else {
                    warn!(panel = %self.panel, "Ignoring settlement with no request in flight");
                }
                None
            }
        }
    }
}

/// Trigger `state`, run the call through `access`, and settle it.
///
/// Returns the state unchanged when the trigger is not allowed.
pub async fn run_panel_request(state: PanelState, access: &ModelAccess) -> PanelState {
    let Transition { state, dispatch } = state.apply(PanelEvent::Triggered);
    let Some(request) = dispatch else {
        return state;
    };
    let text = access.generate(&request).await;
    state.apply(PanelEvent::Settled(text)).state
}
