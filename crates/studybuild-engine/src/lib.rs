//! studybuild-engine: Headless core for the studybuild panels
//!
//! This crate provides everything except the terminal UI:
//! - Configuration and the API credential
//! - Prompt templates for every panel and mode
//! - Panel state and its reducer
//! - The model access component and its Gemini backend
//! - Markdown to HTML rendering

pub mod client;
pub mod config;
pub mod gemini;
pub mod panel;
pub mod render;
pub mod templates;

// Re-export commonly used types
pub use client::{
    GenerationBackend, GenerationError, GenerationOutcome, ModelAccess, GENERATION_FAILED,
    NO_RESPONSE,
};
pub use config::{ApiKey, Config, ConfigError, API_KEY_ENV_VARS, DEFAULT_CONFIG_PATH};
pub use gemini::GeminiBackend;
pub use panel::{run_panel_request, PanelEvent, PanelState, Phase, Transition};
pub use render::{render_document, render_html};
pub use templates::{
    build_request, Body, Mode, PanelId, PanelInfo, ParseError, PromptRequest, Template, TEMPLATES,
};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_version() {
        let version = engine_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
