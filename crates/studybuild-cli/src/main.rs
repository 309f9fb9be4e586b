//! studybuild CLI: learning, developer and knowledge panels backed by Gemini

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use studybuild_engine::{
    render_document, render_html, run_panel_request, Config, Mode, ModelAccess, PanelEvent,
    PanelId, PanelState, DEFAULT_CONFIG_PATH,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// AI study and developer assistant in the terminal
#[derive(Parser, Debug)]
#[command(name = "studybuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: .studybuild/config.json if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Model to use instead of the configured one
    #[arg(long, global = true)]
    model: Option<String>,

    /// Log level or filter directives (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui {
        /// Write logs to this file (the TUI owns the terminal)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Run one panel request and print the result
    Ask {
        /// Panel: learning, dev or knowledge
        #[arg(long)]
        panel: PanelId,

        /// Mode of the panel (default: the panel's first mode)
        #[arg(long)]
        mode: Option<Mode>,

        /// Print the result rendered as HTML
        #[arg(long)]
        html: bool,

        /// Print the prompt and context to stderr before sending
        #[arg(long)]
        show_prompt: bool,

        /// Input text (read from stdin when omitted)
        text: Option<String>,
    },

    /// List panels, modes and their prompt templates
    Templates {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render markdown to HTML
    Render {
        /// Emit a complete HTML page instead of a fragment
        #[arg(long)]
        document: bool,

        /// Markdown file (read from stdin when omitted)
        file: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_file = match &cli.command {
        None => None,
        Some(Commands::Tui { log_file }) => log_file.as_deref(),
        Some(_) => Some(Path::new("-")),
    };
    if let Err(e) = init_logging(&cli.log_level, log_file) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let config = load_config(cli.config.as_deref(), cli.model.as_deref());

    match cli.command {
        None | Some(Commands::Tui { .. }) => cmd_tui(&config),
        Some(Commands::Ask {
            panel,
            mode,
            html,
            show_prompt,
            text,
        }) => cmd_ask(&config, panel, mode, html, show_prompt, text),
        Some(Commands::Templates { json }) => cmd_templates(json),
        Some(Commands::Render { document, file }) => cmd_render(document, file.as_deref()),
    }
}

/// Install the global subscriber.
///
/// `target` of `None` disables logging, `-` logs to stderr, anything else
/// is a file appended to.
fn init_logging(level: &str, target: Option<&Path>) -> Result<(), String> {
    let Some(target) = target else {
        return Ok(());
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if target == Path::new("-") {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .with_target(false)
            .init();
    } else {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(target)
            .map_err(|e| format!("Failed to open log file {}: {e}", target.display()))?;
        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_env_filter(filter)
            .with_ansi(false)
            .init();
    }
    Ok(())
}

/// Resolve configuration: file, then API key from the environment, then overrides.
fn load_config(path: Option<&Path>, model: Option<&str>) -> Config {
    let loaded = match path {
        Some(path) => Config::load(path),
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG_PATH)),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
    .with_api_key_from_env();

    if let Some(model) = model {
        config = config.with_model(model);
    }
    if config.api_key.is_none() {
        debug!("No API key in the environment; requests will fail");
    }
    config
}

fn model_access(config: &Config) -> ModelAccess {
    match ModelAccess::from_config(config) {
        Ok(access) => access,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn runtime() -> tokio::runtime::Runtime {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: Failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_tui(config: &Config) {
    let access = model_access(config);
    let tui = studybuild_tui::run_tui(access, config.tick_rate_ms);
    if let Err(e) = runtime().block_on(tui) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Read a whole input source, exiting on failure.
fn read_input(file: Option<&Path>) -> String {
    let result = match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map(|_| buf)
                .map_err(|e| format!("Failed to read stdin: {e}"))
        }
    };
    match result {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Drop the single line ending a shell pipe adds.
fn strip_final_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

/// Panel state ready to trigger, or a message when `mode` is not one of `panel`'s.
fn prepare_panel(panel: PanelId, mode: Option<Mode>, input: String) -> Result<PanelState, String> {
    let mode = mode.unwrap_or_else(|| panel.default_mode());
    if mode.panel() != panel {
        let modes: Vec<&str> = panel.modes().iter().map(|m| m.as_str()).collect();
        return Err(format!(
            "Mode '{mode}' is not available on panel '{panel}' (choose from: {})",
            modes.join(", ")
        ));
    }

    let mut state = PanelState::new(panel);
    state.update(PanelEvent::ModeSelected(mode));
    state.update(PanelEvent::InputChanged(input));
    Ok(state)
}

fn cmd_ask(
    config: &Config,
    panel: PanelId,
    mode: Option<Mode>,
    html: bool,
    show_prompt: bool,
    text: Option<String>,
) {
    let input = match text {
        Some(text) => text,
        None => strip_final_newline(read_input(None)),
    };

    let state = match prepare_panel(panel, mode, input) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if !state.can_trigger() {
        debug!(panel = %panel, "Empty input, nothing to send");
        return;
    }

    if show_prompt {
        let request = state.pending_request();
        eprintln!(
            "--- context ---\n{}\n--- prompt ---\n{}\n---",
            request.context, request.prompt
        );
    }

    let access = model_access(config);
    info!(panel = %panel, mode = %state.mode(), model = access.model_name(), "Sending request");
    let state = runtime().block_on(run_panel_request(state, &access));

    if html {
        print!("{}", render_html(state.result()));
    } else {
        println!("{}", state.result());
    }
}

fn cmd_templates(json: bool) {
    if json {
        let entries: Vec<serde_json::Value> = PanelId::ALL
            .iter()
            .flat_map(|panel| panel.modes().iter())
            .map(|mode| {
                let template = mode.template();
                serde_json::json!({
                    "panel": mode.panel(),
                    "mode": mode.as_str(),
                    "label": mode.label(),
                    "context": template.context(),
                    "prompt": template.prompt("{input}"),
                })
            })
            .collect();
        match serde_json::to_string_pretty(&entries) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    for panel in PanelId::ALL {
        let info = panel.info();
        println!("{panel} - {}", info.title);
        println!("  {}", info.description);
        for mode in panel.modes() {
            println!("    {:<12} {}", mode.as_str(), mode.label());
        }
        println!();
    }
}

fn cmd_render(document: bool, file: Option<&Path>) {
    let markdown = read_input(file);
    if document {
        let title = file
            .and_then(Path::file_stem)
            .and_then(|s| s.to_str())
            .unwrap_or("studybuild");
        print!("{}", render_document(title, &markdown));
    } else {
        print!("{}", render_html(&markdown));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_opens_tui() {
        let cli = Cli::try_parse_from(["studybuild"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_parse_ask() {
        let cli = Cli::try_parse_from([
            "studybuild",
            "ask",
            "--panel",
            "dev",
            "--mode",
            "doc",
            "--html",
            "fn main() {}",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Ask {
                panel,
                mode,
                html,
                show_prompt,
                text,
            }) => {
                assert_eq!(panel, PanelId::DevTools);
                assert_eq!(mode, Some(Mode::Doc));
                assert!(html);
                assert!(!show_prompt);
                assert_eq!(text.as_deref(), Some("fn main() {}"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_panel() {
        let result = Cli::try_parse_from(["studybuild", "ask", "--panel", "chat"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "studybuild",
            "templates",
            "--json",
            "--model",
            "gemini-2.5-pro",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(cli.log_level, "debug");
        assert!(matches!(cli.command, Some(Commands::Templates { json: true })));
    }

    #[test]
    fn test_parse_tui_log_file() {
        let cli = Cli::try_parse_from(["studybuild", "tui", "--log-file", "tui.log"]).unwrap();
        match cli.command {
            Some(Commands::Tui { log_file }) => {
                assert_eq!(log_file, Some(PathBuf::from("tui.log")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_prepare_panel_defaults_mode() {
        let state = prepare_panel(PanelId::Knowledge, None, "notes".into()).unwrap();
        assert_eq!(state.mode(), Mode::Flashcards);
        assert!(state.can_trigger());
    }

    #[test]
    fn test_prepare_panel_rejects_foreign_mode() {
        let err = prepare_panel(PanelId::Learning, Some(Mode::Debug), "x".into()).unwrap_err();
        assert!(err.contains("eli5, advanced, quiz, summary"));
    }

    #[test]
    fn test_prepare_panel_empty_input_cannot_trigger() {
        let mode = Some(Mode::Flowchart);
        let state = prepare_panel(PanelId::DevTools, mode, String::new()).unwrap();
        assert!(!state.can_trigger());
    }

    #[test]
    fn test_strip_final_newline() {
        assert_eq!(strip_final_newline("Atoms\n".into()), "Atoms");
        assert_eq!(strip_final_newline("a\r\n".into()), "a");
        assert_eq!(strip_final_newline("a\n\n".into()), "a\n");
        assert_eq!(strip_final_newline("a".into()), "a");
    }
}
