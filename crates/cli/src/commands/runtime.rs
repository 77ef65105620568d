//! Shared setup for commands that answer queries.

use helpdesk_core::{config::AppConfig, AppResult};
use helpdesk_knowledge::{
    answer, AnswerSource, KnowledgeBase, LlmGenerator, Router, RoutingDecision,
};
use helpdesk_llm::{create_client, ProviderType};
use helpdesk_prompt::load_prompt_or_builtin;

/// Everything needed to answer queries for one CLI invocation.
pub struct Runtime {
    pub kb: KnowledgeBase,
    pub router: Router,
    pub generator: LlmGenerator,
}

impl Runtime {
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Ok(Self {
            kb: load_knowledge_base(config)?,
            router: Router::from_config(&config.routing),
            generator: build_generator(config)?,
        })
    }

    pub async fn answer(&self, query: &str) -> AppResult<RoutingDecision> {
        answer(&self.kb, query, &self.router, &self.generator).await
    }
}

/// Load the configured FAQ file, or the built-in entries when none is set.
pub fn load_knowledge_base(config: &AppConfig) -> AppResult<KnowledgeBase> {
    match &config.faq_file {
        Some(path) => {
            tracing::info!("Loading FAQ from {:?}", path);
            KnowledgeBase::from_file(path)
        }
        None => {
            tracing::debug!("No FAQ file configured, using built-in entries");
            Ok(KnowledgeBase::default())
        }
    }
}

/// Build the generation collaborator for the active provider.
///
/// A provider that needs an API key but has none yields a generator that
/// answers every call with a missing-credential error.
pub fn build_generator(config: &AppConfig) -> AppResult<LlmGenerator> {
    let api_key = config.resolve_api_key(&config.provider);

    let needs_key = ProviderType::parse(&config.provider)
        .map(|p| p.requires_api_key())
        .unwrap_or(false);
    if needs_key && api_key.is_none() {
        tracing::warn!(
            "No API key for provider '{}'; generated answers are unavailable",
            config.provider
        );
        return Ok(LlmGenerator::unavailable(&config.provider));
    }

    let endpoint = config.resolve_endpoint(&config.provider);
    let client = create_client(&config.provider, endpoint.as_deref(), api_key.as_deref())?;
    let prompt = load_prompt_or_builtin(config.generation.prompt_file.as_deref())?;

    Ok(LlmGenerator::new(client, &config.model)
        .with_prompt(prompt)
        .with_sampling(config.generation.temperature, config.generation.max_tokens))
}

pub fn greeting(name: Option<&str>, query: &str) -> String {
    format!(
        "Hello {}, I will help you with: {}",
        name.unwrap_or("User"),
        query
    )
}

/// Print a decision for a human reader.
pub fn print_decision(decision: &RoutingDecision, config: &AppConfig) {
    let label = decision.source.label();
    match decision.source {
        AnswerSource::Error => println!("[{}] {}", label, decision.answer_text),
        _ => println!("Answer ({}): {}", label, decision.answer_text),
    }

    if decision.escalate {
        println!("This looks like it needs a person. {}", config.escalation.contact);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_defaults_to_user() {
        assert_eq!(
            greeting(None, "Where is HR?"),
            "Hello User, I will help you with: Where is HR?"
        );
        assert_eq!(
            greeting(Some("Ana"), "VPN"),
            "Hello Ana, I will help you with: VPN"
        );
    }
}
