//! Configuration management for helpdesk.
//!
//! Configuration is merged from several sources, later ones winning:
//! - Built-in defaults
//! - The workspace config file (`.helpdesk/config.yaml`)
//! - Environment variables
//! - Command-line flags
//!
//! Settings are workspace-centric: the config file lives under `.helpdesk/`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Environment variable consulted for OpenAI credentials when nothing more
/// specific is configured.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Model used for the openai provider when none is configured.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// Model used for the ollama provider when none is configured.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .helpdesk/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Generation provider ("openai" or "ollama")
    pub provider: String,

    /// Model identifier passed to the provider
    pub model: String,

    /// API key supplied directly through HELPDESK_API_KEY
    pub api_key: Option<String>,

    /// FAQ text file loaded instead of the built-in entries
    pub faq_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Provider configurations from config.yaml
    pub llm: Option<LlmConfig>,

    /// Confidence gate and context size for the router
    pub routing: RoutingConfig,

    /// Sampling parameters for generated answers
    pub generation: GenerationConfig,

    /// Where escalated users are pointed
    pub escalation: EscalationConfig,
}

/// LLM configuration from config.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(rename = "activeProvider")]
    pub active_provider: String,

    pub providers: HashMap<String, ProviderConfig>,
}

/// Provider-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderConfig {
    OpenAI {
        #[serde(rename = "apiKeyEnv")]
        api_key_env: String,
        model: String,
        endpoint: Option<String>,
    },
    Ollama {
        endpoint: String,
        model: String,
        timeout: Option<u64>,
    },
}

impl ProviderConfig {
    pub fn model(&self) -> &str {
        match self {
            Self::OpenAI { model, .. } | Self::Ollama { model, .. } => model,
        }
    }

    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::OpenAI { endpoint, .. } => endpoint.as_deref(),
            Self::Ollama { endpoint, .. } => Some(endpoint.as_str()),
        }
    }
}

/// Router settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingConfig {
    /// Match scores at or above this are answered straight from the FAQ
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,

    /// Number of leading FAQ entries sent as generation context
    #[serde(default = "default_context_entries")]
    pub context_entries: usize,
}

fn default_confidence_threshold() -> f32 {
    0.6
}

fn default_context_entries() -> usize {
    10
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            context_entries: default_context_entries(),
        }
    }
}

/// Sampling parameters for the generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Optional YAML prompt definition overriding the built-in prompt
    #[serde(default)]
    pub prompt_file: Option<PathBuf>,
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_tokens() -> u32 {
    500
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            prompt_file: None,
        }
    }
}

/// Human support contact shown when an interaction is escalated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscalationConfig {
    #[serde(default = "default_escalation_contact")]
    pub contact: String,
}

fn default_escalation_contact() -> String {
    "Please contact IT at it-support@example.com or open a ticket in the IT portal.".to_string()
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            contact: default_escalation_contact(),
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmConfig>,
    workspace: Option<WorkspaceConfig>,
    logging: Option<LoggingConfig>,
    faq: Option<FaqConfig>,
    routing: Option<RoutingConfig>,
    generation: Option<GenerationConfig>,
    escalation: Option<EscalationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkspaceConfig {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FaqConfig {
    path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: "openai".to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            api_key: None,
            faq_file: None,
            log_level: None,
            verbose: false,
            no_color: false,
            llm: None,
            routing: RoutingConfig::default(),
            generation: GenerationConfig::default(),
            escalation: EscalationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, the config file and defaults.
    ///
    /// Environment variables:
    /// - `HELPDESK_WORKSPACE`: Override workspace path
    /// - `HELPDESK_CONFIG`: Path to config file
    /// - `HELPDESK_PROVIDER`: Generation provider
    /// - `HELPDESK_MODEL`: Model identifier
    /// - `HELPDESK_API_KEY`: API key
    /// - `HELPDESK_FAQ`: FAQ text file
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use helpdesk_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Provider: {}", config.provider);
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_from(None, None)
    }

    /// Like [`AppConfig::load`], with an explicit workspace and config file.
    ///
    /// Either one, when given, wins over its environment variable. The
    /// workspace is fixed before the config file path is derived from it.
    pub fn load_from(
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
    ) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(workspace) = workspace
            .or_else(|| std::env::var("HELPDESK_WORKSPACE").ok().map(PathBuf::from))
        {
            config.workspace = workspace;
        }

        config.config_file = config_file.or_else(|| {
            std::env::var("HELPDESK_CONFIG").ok().map(PathBuf::from)
        });

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = match config.config_file {
            Some(ref cf) => cf.clone(),
            None => config.helpdesk_dir().join("config.yaml"),
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("HELPDESK_PROVIDER") {
            config.switch_provider(provider);
        }

        if let Ok(model) = std::env::var("HELPDESK_MODEL") {
            config.model = model;
        }

        if let Ok(faq) = std::env::var("HELPDESK_FAQ") {
            config.faq_file = Some(PathBuf::from(faq));
        }

        config.api_key = std::env::var("HELPDESK_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(path) = config_file.workspace.and_then(|ws| ws.path) {
            result.workspace = PathBuf::from(path);
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        if let Some(path) = config_file.faq.and_then(|faq| faq.path) {
            result.faq_file = Some(resolve_relative(&result.workspace, &path));
        }

        if let Some(routing) = config_file.routing {
            result.routing = routing;
        }

        if let Some(mut generation) = config_file.generation {
            generation.prompt_file = generation
                .prompt_file
                .map(|p| resolve_relative(&result.workspace, &p.to_string_lossy()));
            result.generation = generation;
        }

        if let Some(escalation) = config_file.escalation {
            result.escalation = escalation;
        }

        if let Some(llm) = config_file.llm {
            result.provider = llm.active_provider.clone();

            if let Some(provider_config) = llm.providers.get(&llm.active_provider) {
                result.model = provider_config.model().to_string();
            }

            result.llm = Some(llm);
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over environment variables and
    /// the config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        faq_file: Option<PathBuf>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.switch_provider(provider);
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(faq_file) = faq_file {
            self.faq_file = Some(faq_file);
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Change the active provider.
    ///
    /// Switching to a different provider also resets the model to the one
    /// configured for it, or its built-in default. An explicit model set
    /// afterwards still wins.
    fn switch_provider(&mut self, provider: String) {
        if provider.eq_ignore_ascii_case(&self.provider) {
            return;
        }

        self.model = self.default_model_for(&provider);
        self.provider = provider;
    }

    /// Model for `provider`: its config.yaml entry, else the built-in default.
    pub fn default_model_for(&self, provider: &str) -> String {
        if let Some(pc) = self.get_provider_config(provider) {
            return pc.model().to_string();
        }

        if provider.eq_ignore_ascii_case("ollama") {
            DEFAULT_OLLAMA_MODEL.to_string()
        } else {
            DEFAULT_OPENAI_MODEL.to_string()
        }
    }

    /// Get the path to the .helpdesk directory.
    pub fn helpdesk_dir(&self) -> PathBuf {
        self.workspace.join(".helpdesk")
    }

    /// Get the configuration for a provider, if config.yaml declared one.
    pub fn get_provider_config(&self, provider: &str) -> Option<&ProviderConfig> {
        self.llm.as_ref().and_then(|llm| llm.providers.get(provider))
    }

    /// Resolve the endpoint for a provider from config.yaml.
    pub fn resolve_endpoint(&self, provider: &str) -> Option<String> {
        self.get_provider_config(provider)
            .and_then(|pc| pc.endpoint())
            .map(str::to_string)
    }

    /// Resolve the API key for a provider.
    ///
    /// Order: `HELPDESK_API_KEY`, the provider's `apiKeyEnv`, then
    /// `OPENAI_API_KEY` for the openai provider.
    pub fn resolve_api_key(&self, provider: &str) -> Option<String> {
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }

        if let Some(ProviderConfig::OpenAI { api_key_env, .. }) = self.get_provider_config(provider)
        {
            if let Some(key) = non_empty_env(api_key_env) {
                return Some(key);
            }
        }

        if provider.eq_ignore_ascii_case("openai") {
            return non_empty_env(OPENAI_API_KEY_ENV);
        }

        None
    }

    /// Validate configuration for the active provider.
    ///
    /// A missing API key is not a configuration error: it surfaces later as
    /// an error answer from the router.
    pub fn validate(&self) -> AppResult<()> {
        let known_providers = ["openai", "ollama"];

        if !known_providers.contains(&self.provider.to_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                known_providers.join(", ")
            )));
        }

        let threshold = self.routing.confidence_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(AppError::Config(format!(
                "confidenceThreshold must be between 0 and 1, got {}",
                threshold
            )));
        }

        Ok(())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn resolve_relative(workspace: &Path, path: &str) -> PathBuf {
    let candidate = PathBuf::from(path);
    if candidate.is_absolute() {
        candidate
    } else {
        workspace.join(candidate)
    }
}
