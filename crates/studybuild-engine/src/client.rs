//! Model access: the single boundary to the generation API.
//!
//! [`ModelAccess::generate_content`] always returns display text. Backend
//! results pass through [`GenerationOutcome`] first, which is where every
//! failure collapses into [`GENERATION_FAILED`].

use crate::config::Config;
use crate::gemini::GeminiBackend;
use crate::templates::PromptRequest;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error};

/// Returned when the model answered with no text.
pub const NO_RESPONSE: &str = "No response generated.";

/// Returned for any failed generation call.
pub const GENERATION_FAILED: &str =
    "Error generating content. Please check your API key or try again later.";

/// A transport to a text generation model.
///
/// Implementations issue exactly one request per call and keep no state
/// between calls. `Ok(None)` means the model returned no text.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Send `prompt` as content with `context` as the system instruction.
    async fn generate(
        &self,
        prompt: &str,
        context: &str,
    ) -> Result<Option<String>, GenerationError>;

    /// Model identifier, for logging and display.
    fn model_name(&self) -> &str;
}

/// Result of one generation call before it is turned into display text.
#[derive(Debug)]
pub enum GenerationOutcome {
    /// Non-empty text from the model.
    Text(String),
    /// The call succeeded but produced no text.
    Empty,
    /// The call failed.
    Failed(GenerationError),
}

impl GenerationOutcome {
    /// Classify a backend result.
    pub fn from_result(result: Result<Option<String>, GenerationError>) -> Self {
        match result {
            Ok(Some(text)) if !text.is_empty() => Self::Text(text),
            Ok(_) => Self::Empty,
            Err(e) => Self::Failed(e),
        }
    }

    /// Whether this outcome is a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Collapse into the text shown to the user.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Empty => NO_RESPONSE.to_string(),
            Self::Failed(_) => GENERATION_FAILED.to_string(),
        }
    }
}

/// Shared handle to the generation backend. Cheap to clone.
#[derive(Clone)]
pub struct ModelAccess {
    backend: Arc<dyn GenerationBackend>,
}

impl ModelAccess {
    /// Wrap a backend.
    pub fn new(backend: impl GenerationBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Build the Gemini backend described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, GenerationError> {
        Ok(Self::new(GeminiBackend::new(config)?))
    }

    /// Model identifier of the underlying backend.
    pub fn model_name(&self) -> &str {
        self.backend.model_name()
    }

    /// Issue one call and classify the result. Failures are logged here.
    pub async fn call(&self, prompt: &str, context: &str) -> GenerationOutcome {
        debug!(
            model = self.backend.model_name(),
            prompt_len = prompt.len(),
            "Dispatching generation call"
        );
        let result = self.backend.generate(prompt, context).await;
        let outcome = GenerationOutcome::from_result(result);
        match &outcome {
            GenerationOutcome::Failed(e) => {
                error!(model = self.backend.model_name(), error = %e, "Generation call failed");
            }
            GenerationOutcome::Empty => {
                debug!(
                    model = self.backend.model_name(),
                    "Generation returned no text"
                );
            }
            GenerationOutcome::Text(text) => {
                debug!(
                    model = self.backend.model_name(),
                    response_len = text.len(),
                    "Generation succeeded"
                );
            }
        }
        outcome
    }

    /// Generate display text. Never fails.
    pub async fn generate_content(&self, prompt: &str, context: &str) -> String {
        self.call(prompt, context).await.into_text()
    }

    /// Generate display text for a built request.
    pub async fn generate(&self, request: &PromptRequest) -> String {
        self.generate_content(&request.prompt, &request.context).await
    }
}

impl std::fmt::Debug for ModelAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelAccess")
            .field("model", &self.backend.model_name())
            .finish()
    }
}

/// Errors from a generation call. Never shown to the user verbatim.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// No API key was configured.
    #[error("no API key configured")]
    MissingApiKey,

    /// Transport failure (connect, TLS, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body was not valid JSON of the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[source] serde_json::Error),
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Backend that replays one scripted reply and records calls.
    pub(crate) struct ScriptedBackend {
        reply: Mutex<Option<Result<Option<String>, GenerationError>>>,
        pub(crate) calls: Arc<AtomicUsize>,
        pub(crate) last_request: Arc<Mutex<Option<(String, String)>>>,
    }

    impl ScriptedBackend {
        pub(crate) fn replying(reply: Result<Option<String>, GenerationError>) -> Self {
            Self {
                reply: Mutex::new(Some(reply)),
                calls: Arc::new(AtomicUsize::new(0)),
                last_request: Arc::new(Mutex::new(None)),
            }
        }

        pub(crate) fn text(text: &str) -> Self {
            Self::replying(Ok(Some(text.to_string())))
        }

        pub(crate) fn failing() -> Self {
            Self::replying(Err(GenerationError::Api {
                status: 403,
                message: "API key not valid".into(),
            }))
        }
    }

    #[async_trait]
    impl GenerationBackend for ScriptedBackend {
        async fn generate(
            &self,
            prompt: &str,
            context: &str,
        ) -> Result<Option<String>, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some((prompt.to_string(), context.to_string()));
            self.reply.lock().unwrap().take().unwrap_or(Ok(None))
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    #[tokio::test]
    async fn test_success_returns_text_unchanged() {
        let access = ModelAccess::new(ScriptedBackend::text("  # Answer\n"));
        assert_eq!(access.generate_content("p", "c").await, "  # Answer\n");
    }

    #[tokio::test]
    async fn test_missing_text_returns_placeholder() {
        let access = ModelAccess::new(ScriptedBackend::replying(Ok(None)));
        assert_eq!(access.generate_content("p", "c").await, NO_RESPONSE);
    }

    #[tokio::test]
    async fn test_empty_text_returns_placeholder() {
        let access = ModelAccess::new(ScriptedBackend::text(""));
        assert_eq!(access.generate_content("p", "c").await, NO_RESPONSE);
    }

    #[tokio::test]
    async fn test_failure_collapses_to_fixed_message() {
        let access = ModelAccess::new(ScriptedBackend::failing());
        assert_eq!(access.generate_content("p", "c").await, GENERATION_FAILED);

        let missing_key = Err(GenerationError::MissingApiKey);
        let access = ModelAccess::new(ScriptedBackend::replying(missing_key));
        assert_eq!(access.generate_content("p", "c").await, GENERATION_FAILED);
    }

    #[tokio::test]
    async fn test_channels_are_passed_through() {
        let backend = ScriptedBackend::text("ok");
        let last = backend.last_request.clone();
        let calls = backend.calls.clone();
        let access = ModelAccess::new(backend);

        let request = PromptRequest {
            prompt: "the prompt".into(),
            context: "the context".into(),
        };
        access.generate(&request).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            last.lock().unwrap().clone(),
            Some(("the prompt".to_string(), "the context".to_string()))
        );
    }

    #[test]
    fn test_outcome_classification() {
        assert!(matches!(
            GenerationOutcome::from_result(Ok(Some("x".into()))),
            GenerationOutcome::Text(_)
        ));
        assert!(matches!(
            GenerationOutcome::from_result(Ok(Some(String::new()))),
            GenerationOutcome::Empty
        ));
        let failed = GenerationOutcome::from_result(Err(GenerationError::MissingApiKey));
        assert!(failed.is_failure());
    }

    #[tokio::test]
    async fn test_concurrent_calls_are_independent() {
        let access = ModelAccess::new(ScriptedBackend::text("first"));
        let other = access.clone();

        let (a, b) = tokio::join!(
            access.generate_content("a", "c"),
            other.generate_content("b", "c")
        );

        // One call consumes the scripted reply, the other sees no text.
        let mut results = vec![a, b];
        results.sort();
        assert_eq!(results, vec![NO_RESPONSE.to_string(), "first".to_string()]);
    }
}
