//! FAQ knowledge base and question routing.
//!
//! A query is matched lexically against the FAQ. Confident matches are
//! answered from the FAQ; the rest go to a text-generation collaborator with
//! the leading FAQ entries as context, and may be flagged for escalation to
//! human support.

pub mod faq;
pub mod matcher;
pub mod routing;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use faq::{default_entries, parse_faq, serialize_faq, FaqEntry, KnowledgeBase};
pub use matcher::{match_query, MatchResult, EXACT_MATCH_SCORE};
pub use routing::{
    build_context, should_escalate, AnswerSource, GenerationError, Generator, LlmGenerator,
    Router, RoutingDecision,
};

use helpdesk_core::{AppError, AppResult};

/// Answer one query against the knowledge base.
///
/// Runs the matcher over the current entries and hands the result to the
/// router. Only a blank query is an error; generation failures come back as
/// a decision with [`AnswerSource::Error`].
pub async fn answer(
    kb: &KnowledgeBase,
    query: &str,
    router: &Router,
    generator: &dyn Generator,
) -> AppResult<RoutingDecision> {
    if query.trim().is_empty() {
        return Err(AppError::EmptyQuery);
    }

    tracing::info!("Answering query against {} FAQ entries", kb.len());

    let matched = match_query(query, kb.snapshot());
    let decision = router
        .decide(query, &matched, kb.snapshot(), generator)
        .await;

    tracing::debug!(
        "Decision: source={}, escalate={}, score={:.3}",
        decision.source,
        decision.escalate,
        decision.score
    );

    Ok(decision)
}
