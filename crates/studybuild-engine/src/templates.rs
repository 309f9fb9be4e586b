//! Prompt templates for the three feature panels.
//!
//! Every `(panel, mode)` pair maps to exactly one [`Template`]. Templates are
//! plain data: an instruction sentence, the way the user's text is embedded,
//! and an optional addition to the panel's base system context.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three feature panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanelId {
    /// Learning assistant: explanations, quizzes, summaries.
    #[serde(rename = "learning")]
    Learning,
    /// Developer tools: debugging, explaining and documenting code.
    #[serde(rename = "dev")]
    DevTools,
    /// Knowledge organizer: flashcards, podcast scripts, insights.
    #[serde(rename = "knowledge")]
    Knowledge,
}

impl PanelId {
    /// All panels in sidebar order.
    pub const ALL: [PanelId; 3] = [PanelId::Learning, PanelId::DevTools, PanelId::Knowledge];

    /// Stable identifier used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            PanelId::Learning => "learning",
            PanelId::DevTools => "dev",
            PanelId::Knowledge => "knowledge",
        }
    }

    /// Position in sidebar order.
    pub fn index(self) -> usize {
        match self {
            PanelId::Learning => 0,
            PanelId::DevTools => 1,
            PanelId::Knowledge => 2,
        }
    }

    /// Modes offered by this panel, in display order.
    pub fn modes(self) -> &'static [Mode] {
        match self {
            PanelId::Learning => &[Mode::Eli5, Mode::Advanced, Mode::Quiz, Mode::Summary],
            PanelId::DevTools => &[Mode::Debug, Mode::Explain, Mode::Doc, Mode::Flowchart],
            PanelId::Knowledge => &[Mode::Flashcards, Mode::Podcast, Mode::Insights],
        }
    }

    /// Mode selected when the panel is first shown.
    pub fn default_mode(self) -> Mode {
        self.modes()[0]
    }

    /// Shared persona sent as system context for every mode of this panel.
    pub fn base_context(self) -> &'static str {
        match self {
            PanelId::Learning => "You are an expert tutor. Output strictly in Markdown.",
            PanelId::DevTools => {
                "You are an expert Senior Software Engineer. Output strictly in Markdown. Use code blocks for code."
            }
            PanelId::Knowledge => {
                "You are a Knowledge Management Expert. Output strictly in Markdown."
            }
        }
    }

    /// Display metadata for this panel.
    pub fn info(self) -> &'static PanelInfo {
        match self {
            PanelId::Learning => &LEARNING_INFO,
            PanelId::DevTools => &DEV_TOOLS_INFO,
            PanelId::Knowledge => &KNOWLEDGE_INFO,
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PanelId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "learning" => Ok(PanelId::Learning),
            "dev" | "dev-tools" | "devtools" => Ok(PanelId::DevTools),
            "knowledge" => Ok(PanelId::Knowledge),
            _ => Err(ParseError::UnknownPanel(s.to_string())),
        }
    }
}

/// Text shown around a panel: titles, labels, button captions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PanelInfo {
    /// Header title.
    pub title: &'static str,
    /// Short sidebar label.
    pub nav_label: &'static str,
    /// One-line description under the title.
    pub description: &'static str,
    /// Label above the input box.
    pub input_label: &'static str,
    /// Placeholder shown while the input is empty.
    pub placeholder: &'static str,
    /// Caption of the trigger button.
    pub action_label: &'static str,
    /// Caption of the trigger button while a request is in flight.
    pub busy_label: &'static str,
}

const LEARNING_INFO: PanelInfo = PanelInfo {
    title: "Learning Assistant",
    nav_label: "Learning",
    description: "Simplify concepts, generate quizzes, or get summaries.",
    input_label: "What do you want to learn?",
    placeholder: "e.g., Explain Quantum Computing, or paste a lecture note here...",
    action_label: "Generate",
    busy_label: "Thinking...",
};

const DEV_TOOLS_INFO: PanelInfo = PanelInfo {
    title: "Developer Tools",
    nav_label: "Dev Tools",
    description: "Debug, document, or analyze code snippets instantly.",
    input_label: "Paste your code here:",
    placeholder: "// Paste code snippet here...",
    action_label: "Run Tool",
    busy_label: "Analyzing...",
};

const KNOWLEDGE_INFO: PanelInfo = PanelInfo {
    title: "Knowledge Organizer",
    nav_label: "Knowledge",
    description: "Transform notes into flashcards, podcasts, or structured insights.",
    input_label: "Paste your notes or text:",
    placeholder: "Paste article text, meeting notes, or random thoughts...",
    action_label: "Organize",
    busy_label: "Processing...",
};

/// A prompt template selector. Each mode belongs to exactly one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Eli5,
    Advanced,
    Quiz,
    Summary,
    Debug,
    Explain,
    Doc,
    Flowchart,
    Flashcards,
    Podcast,
    Insights,
}

impl Mode {
    /// Stable identifier used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Eli5 => "eli5",
            Mode::Advanced => "advanced",
            Mode::Quiz => "quiz",
            Mode::Summary => "summary",
            Mode::Debug => "debug",
            Mode::Explain => "explain",
            Mode::Doc => "doc",
            Mode::Flowchart => "flowchart",
            Mode::Flashcards => "flashcards",
            Mode::Podcast => "podcast",
            Mode::Insights => "insights",
        }
    }

    /// Panel this mode belongs to.
    pub fn panel(self) -> PanelId {
        match self {
            Mode::Eli5 | Mode::Advanced | Mode::Quiz | Mode::Summary => PanelId::Learning,
            Mode::Debug | Mode::Explain | Mode::Doc | Mode::Flowchart => PanelId::DevTools,
            Mode::Flashcards | Mode::Podcast | Mode::Insights => PanelId::Knowledge,
        }
    }

    /// Caption of the mode button.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Eli5 => "ELI5 (Simple)",
            Mode::Advanced => "Advanced",
            Mode::Quiz => "Generate Quiz",
            Mode::Summary => "Summarize",
            Mode::Debug => "Debug",
            Mode::Explain => "Explain Code",
            Mode::Doc => "Generate Docs",
            Mode::Flowchart => "Flowchart Logic",
            Mode::Flashcards => "Flashcards",
            Mode::Podcast => "Podcast Script",
            Mode::Insights => "Key Insights",
        }
    }

    /// The template this mode selects.
    pub fn template(self) -> &'static Template {
        match self {
            Mode::Eli5 => &ELI5,
            Mode::Advanced => &ADVANCED,
            Mode::Quiz => &QUIZ,
            Mode::Summary => &SUMMARY,
            Mode::Debug => &DEBUG,
            Mode::Explain => &EXPLAIN,
            Mode::Doc => &DOC,
            Mode::Flowchart => &FLOWCHART,
            Mode::Flashcards => &FLASHCARDS,
            Mode::Podcast => &PODCAST,
            Mode::Insights => &INSIGHTS,
        }
    }

    /// Next mode of the same panel, wrapping around.
    pub fn next(self) -> Mode {
        let modes = self.panel().modes();
        let pos = modes.iter().position(|m| *m == self).unwrap_or(0);
        modes[(pos + 1) % modes.len()]
    }

    /// Previous mode of the same panel, wrapping around.
    pub fn prev(self) -> Mode {
        let modes = self.panel().modes();
        let pos = modes.iter().position(|m| *m == self).unwrap_or(0);
        modes[(pos + modes.len() - 1) % modes.len()]
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TEMPLATES
            .iter()
            .map(|t| t.mode)
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownMode(s.to_string()))
    }
}

/// How the user's text is embedded after the instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Body {
    /// `Label: <input>` on its own paragraph.
    Labeled(&'static str),
    /// The input inside a fenced code block under a `Code:` heading.
    FencedCode,
}

/// A fixed instruction plus the rules for embedding the user's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub mode: Mode,
    pub instruction: &'static str,
    pub body: Body,
    /// Appended to the panel's base context for this mode only.
    pub context_suffix: Option<&'static str>,
}

impl Template {
    /// Render the prompt text. The input is inserted verbatim.
    pub fn prompt(&self, input: &str) -> String {
        match self.body {
            Body::Labeled(label) => format!("{} \n\n{label}: {input}", self.instruction),
            Body::FencedCode => format!("{} \n\nCode:\n```\n{input}\n```", self.instruction),
        }
    }

    /// Render the system context text.
    pub fn context(&self) -> String {
        let base = self.mode.panel().base_context();
        match self.context_suffix {
            Some(suffix) => format!("{base}{suffix}"),
            None => base.to_string(),
        }
    }

    /// Build the full request for the given input.
    pub fn build(&self, input: &str) -> PromptRequest {
        PromptRequest {
            prompt: self.prompt(input),
            context: self.context(),
        }
    }
}

/// The two text channels sent with one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptRequest {
    /// Task content.
    pub prompt: String,
    /// Persona and behavior instruction.
    pub context: String,
}

/// Build the request for `mode` with the user's `input`.
pub fn build_request(mode: Mode, input: &str) -> PromptRequest {
    mode.template().build(input)
}

const ELI5: Template = Template {
    mode: Mode::Eli5,
    instruction: "Explain the following concept like I am 5 years old. Use analogies.",
    body: Body::Labeled("Input"),
    context_suffix: Some(" Use simple language, short sentences, and fun analogies."),
};

const ADVANCED: Template = Template {
    mode: Mode::Advanced,
    instruction: "Provide a comprehensive, technical, and advanced explanation of the following. Include key terminology and deeper insights.",
    body: Body::Labeled("Input"),
    context_suffix: Some(" Assume the user is an expert. Be concise but deep."),
};

const QUIZ: Template = Template {
    mode: Mode::Quiz,
    instruction: "Generate a 5-question multiple choice quiz based on the following text/topic. Include the correct answer at the end.",
    body: Body::Labeled("Input"),
    context_suffix: None,
};

const SUMMARY: Template = Template {
    mode: Mode::Summary,
    instruction: "Summarize the following text into key bullet points and a \"Key Takeaway\" section.",
    body: Body::Labeled("Input"),
    context_suffix: None,
};

const DEBUG: Template = Template {
    mode: Mode::Debug,
    instruction: "Analyze the following code for bugs, errors, or potential issues. Explain the problem and provide the fixed code.",
    body: Body::FencedCode,
    context_suffix: None,
};

const EXPLAIN: Template = Template {
    mode: Mode::Explain,
    instruction: "Explain the logic of this code line-by-line or function-by-function.",
    body: Body::FencedCode,
    context_suffix: None,
};

const DOC: Template = Template {
    mode: Mode::Doc,
    instruction: "Generate professional documentation (JSDoc/DocString style) and a high-level summary for this code.",
    body: Body::FencedCode,
    context_suffix: None,
};

const FLOWCHART: Template = Template {
    mode: Mode::Flowchart,
    instruction: "Describe the control flow of this code as a text-based flowchart or step-by-step logic sequence.",
    body: Body::FencedCode,
    context_suffix: None,
};

const FLASHCARDS: Template = Template {
    mode: Mode::Flashcards,
    instruction: "Create a set of study flashcards from the following text. Format as \"Q: [Question] \n A: [Answer]\".",
    body: Body::Labeled("Text"),
    context_suffix: None,
};

const PODCAST: Template = Template {
    mode: Mode::Podcast,
    instruction: "Convert the following notes into an engaging script for a 2-host podcast (Host A and Host B). Make it conversational and easy to listen to.",
    body: Body::Labeled("Notes"),
    context_suffix: None,
};

const INSIGHTS: Template = Template {
    mode: Mode::Insights,
    instruction: "Extract the core insights, unique ideas, and actionable takeaways from the text. Format as a bulleted list.",
    body: Body::Labeled("Text"),
    context_suffix: None,
};

/// Every template, grouped by panel in display order.
pub static TEMPLATES: [Template; 11] = [
    ELI5, ADVANCED, QUIZ, SUMMARY, DEBUG, EXPLAIN, DOC, FLOWCHART, FLASHCARDS, PODCAST, INSIGHTS,
];

/// Errors parsing panel or mode identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Unrecognized panel name.
    #[error("unknown panel '{0}' (expected learning, dev or knowledge)")]
    UnknownPanel(String),

    /// Unrecognized mode name.
    #[error("unknown mode '{0}'")]
    UnknownMode(String),
}
