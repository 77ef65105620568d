//! Generation collaborator used for low-confidence queries.

use async_trait::async_trait;
use helpdesk_llm::{LlmClient, LlmRequest};
use helpdesk_prompt::{build_prompt, PromptDefinition};
use std::sync::Arc;
use thiserror::Error;

/// Marker that starts every failure text shown to the user.
pub const ERROR_PREFIX: &str = "ERROR:";

const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_TEMPERATURE: f32 = 0.2;
const DEFAULT_MAX_TOKENS: u32 = 500;

/// Why the collaborator could not produce an answer.
///
/// Every message starts with [`ERROR_PREFIX`], so the rendered error can be
/// shown as the answer text as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("ERROR: API key not found for provider '{0}'. Set HELPDESK_API_KEY or OPENAI_API_KEY.")]
    MissingCredential(String),

    #[error("ERROR: generation call failed: {0}")]
    Provider(String),

    #[error("ERROR: could not render prompt: {0}")]
    Prompt(String),
}

impl GenerationError {
    /// Classify text from a collaborator that reports failure in-band.
    ///
    /// Text starting with `ERROR:` becomes a [`GenerationError::Provider`]
    /// carrying the rest of the message; anything else is an answer.
    pub fn from_sentinel(text: String) -> Result<String, GenerationError> {
        match text.strip_prefix(ERROR_PREFIX) {
            Some(rest) => Err(GenerationError::Provider(rest.trim().to_string())),
            None => Ok(text),
        }
    }
}

/// Produces an answer for a query given FAQ context.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, query: &str, context: &str) -> Result<String, GenerationError>;
}

enum Backend {
    Client(Arc<dyn LlmClient>),
    Unavailable { provider: String },
}

/// [`Generator`] backed by an [`LlmClient`].
///
/// Renders the support prompt, issues exactly one completion and trims the
/// reply. No retry.
pub struct LlmGenerator {
    backend: Backend,
    model: String,
    prompt: PromptDefinition,
    temperature: f32,
    max_tokens: u32,
}

impl LlmGenerator {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self::with_backend(Backend::Client(client), model.into())
    }

    /// A generator for a provider with no credential configured.
    ///
    /// Every call fails with [`GenerationError::MissingCredential`].
    pub fn unavailable(provider: impl Into<String>) -> Self {
        Self::with_backend(
            Backend::Unavailable {
                provider: provider.into(),
            },
            DEFAULT_MODEL.to_string(),
        )
    }

    fn with_backend(backend: Backend, model: String) -> Self {
        Self {
            backend,
            model,
            prompt: PromptDefinition::builtin(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Use a custom prompt definition instead of the built-in one.
    pub fn with_prompt(mut self, prompt: PromptDefinition) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Generator for LlmGenerator {
    async fn generate(&self, query: &str, context: &str) -> Result<String, GenerationError> {
        let client = match &self.backend {
            Backend::Client(client) => client,
            Backend::Unavailable { provider } => {
                tracing::warn!("No API key configured for provider '{}'", provider);
                return Err(GenerationError::MissingCredential(provider.clone()));
            }
        };

        let built = build_prompt(&self.prompt, query, context)
            .map_err(|e| GenerationError::Prompt(e.to_string()))?;

        let mut request = LlmRequest::new(built.user, &self.model)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);
        if let Some(system) = built.system {
            request = request.with_system(system);
        }

        tracing::debug!(
            "Generating answer (provider: {}, model: {}, prompt: {})",
            client.provider_name(),
            self.model,
            built.source_prompt_id
        );

        let response = client.complete(&request).await.map_err(|e| {
            tracing::warn!("Generation call failed: {}", e);
            GenerationError::Provider(e.to_string())
        })?;

        tracing::debug!(
            "Generation used {} tokens",
            response.usage.total_tokens
        );

        GenerationError::from_sentinel(response.content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpdesk_core::{AppError, AppResult};
    use helpdesk_llm::{LlmResponse, LlmUsage};
    use std::sync::Mutex;

    /// Records every request and replies with a fixed result.
    struct FakeLlmClient {
        reply: AppResult<String>,
        requests: Mutex<Vec<LlmRequest>>,
    }

    impl FakeLlmClient {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(AppError::Llm(message.to_string())),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmClient for FakeLlmClient {
        fn provider_name(&self) -> &str {
            "fake"
        }

        async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(text) => Ok(LlmResponse {
                    content: text.clone(),
                    model: request.model.clone(),
                    usage: LlmUsage::new(10, 5),
                }),
                Err(e) => Err(AppError::Llm(e.to_string())),
            }
        }
    }

    #[test]
    fn test_error_messages_carry_prefix() {
        let errors = [
            GenerationError::MissingCredential("openai".to_string()),
            GenerationError::Provider("timeout".to_string()),
            GenerationError::Prompt("bad template".to_string()),
        ];
        for error in errors {
            assert!(error.to_string().starts_with(ERROR_PREFIX));
        }
        assert_eq!(
            GenerationError::MissingCredential("openai".to_string()).to_string(),
            "ERROR: API key not found for provider 'openai'. Set HELPDESK_API_KEY or OPENAI_API_KEY."
        );
    }

    #[test]
    fn test_from_sentinel() {
        assert_eq!(
            GenerationError::from_sentinel("All good".to_string()),
            Ok("All good".to_string())
        );
        assert_eq!(
            GenerationError::from_sentinel("ERROR: quota exceeded".to_string()),
            Err(GenerationError::Provider("quota exceeded".to_string()))
        );
    }

    #[tokio::test]
    async fn test_generate_sends_one_rendered_request() {
        let client = Arc::new(FakeLlmClient::replying("  Restart the router.\n"));
        let generator = LlmGenerator::new(client.clone(), "gpt-test");

        let answer = generator
            .generate("Wifi is slow", "Q: How to contact IT support?\nA: ext. 1234")
            .await
            .unwrap();
        assert_eq!(answer, "Restart the router.");

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.model, "gpt-test");
        assert_eq!(request.temperature, Some(0.2));
        assert_eq!(request.max_tokens, Some(500));
        assert!(request.system.is_some());
        assert!(request.prompt.contains("Q: How to contact IT support?"));
        assert!(request.prompt.ends_with("User question: Wifi is slow"));
    }

    #[tokio::test]
    async fn test_sampling_override() {
        let client = Arc::new(FakeLlmClient::replying("ok"));
        let generator = LlmGenerator::new(client.clone(), "m").with_sampling(0.7, 64);

        generator.generate("q", "").await.unwrap();

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests[0].temperature, Some(0.7));
        assert_eq!(requests[0].max_tokens, Some(64));
    }

    #[tokio::test]
    async fn test_custom_prompt_without_system() {
        let client = Arc::new(FakeLlmClient::replying("ok"));
        let mut prompt = PromptDefinition::builtin();
        prompt.system = None;
        prompt.template = "{{question}}".to_string();
        let generator = LlmGenerator::new(client.clone(), "m").with_prompt(prompt);

        generator.generate("Where is HR?", "ignored").await.unwrap();

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests[0].prompt, "Where is HR?");
        assert!(requests[0].system.is_none());
    }

    #[tokio::test]
    async fn test_provider_failure_maps_to_error() {
        let client = Arc::new(FakeLlmClient::failing("connection refused"));
        let generator = LlmGenerator::new(client, "m");

        let err = generator.generate("q", "").await.unwrap_err();
        assert!(matches!(err, GenerationError::Provider(_)));
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_in_band_error_reply_is_classified() {
        let client = Arc::new(FakeLlmClient::replying("ERROR: model overloaded"));
        let generator = LlmGenerator::new(client, "m");

        let err = generator.generate("q", "").await.unwrap_err();
        assert_eq!(err, GenerationError::Provider("model overloaded".to_string()));
    }

    #[tokio::test]
    async fn test_unavailable_never_calls_out() {
        let generator = LlmGenerator::unavailable("openai");
        let err = generator.generate("q", "").await.unwrap_err();
        assert_eq!(err, GenerationError::MissingCredential("openai".to_string()));
    }
}
