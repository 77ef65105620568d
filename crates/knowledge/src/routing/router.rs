//! Routing decision between the FAQ fast path and generation.

use super::escalation::should_escalate;
use super::generator::Generator;
use super::types::{AnswerSource, RoutingDecision};
use crate::faq::FaqEntry;
use crate::matcher::MatchResult;
use helpdesk_core::config::RoutingConfig;

/// Match scores at or above this are answered straight from the FAQ.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.6;

/// Leading FAQ entries sent to the generator as context.
pub const DEFAULT_CONTEXT_ENTRIES: usize = 10;

/// Stateless router. Holds only its tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Router {
    pub confidence_threshold: f32,
    pub context_entries: usize,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_CONTEXT_ENTRIES)
    }
}

impl Router {
    pub fn new(confidence_threshold: f32, context_entries: usize) -> Self {
        Self {
            confidence_threshold,
            context_entries,
        }
    }

    pub fn from_config(config: &RoutingConfig) -> Self {
        Self::new(config.confidence_threshold, config.context_entries)
    }

    /// Decide how to answer `query` given its best FAQ match.
    ///
    /// A confident match is returned as-is and never escalates. Otherwise
    /// the generator is called exactly once and its reply (or failure text)
    /// is checked for escalation. Never fails.
    pub async fn decide(
        &self,
        query: &str,
        matched: &MatchResult,
        entries: &[FaqEntry],
        generator: &dyn Generator,
    ) -> RoutingDecision {
        if matched.score >= self.confidence_threshold {
            tracing::info!(
                "Answering from FAQ (score: {:.3}, threshold: {:.2})",
                matched.score,
                self.confidence_threshold
            );
            return RoutingDecision {
                answer_text: matched.answer.clone(),
                source: AnswerSource::Faq,
                escalate: false,
                score: matched.score,
            };
        }

        tracing::info!(
            "Low FAQ confidence (score: {:.3}), generating answer",
            matched.score
        );

        let context = build_context(entries, self.context_entries);

        let (answer_text, source) = match generator.generate(query, &context).await {
            Ok(text) => (text, AnswerSource::Generated),
            Err(e) => {
                tracing::warn!("Generation failed: {}", e);
                (e.to_string(), AnswerSource::Error)
            }
        };

        let escalate = should_escalate(query, &answer_text);
        if escalate {
            tracing::info!("Query flagged for escalation");
        }

        RoutingDecision {
            answer_text,
            source,
            escalate,
            score: matched.score,
        }
    }
}

/// Render the first `limit` entries as `Q:`/`A:` blocks, one per line pair.
pub fn build_context(entries: &[FaqEntry], limit: usize) -> String {
    entries
        .iter()
        .take(limit)
        .map(|entry| format!("Q: {}\nA: {}", entry.question, entry.answer))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faq::default_entries;

    #[test]
    fn test_defaults() {
        let router = Router::default();
        assert_eq!(router.confidence_threshold, 0.6);
        assert_eq!(router.context_entries, 10);
        assert_eq!(Router::from_config(&RoutingConfig::default()), router);
    }

    #[test]
    fn test_build_context_layout() {
        let context = build_context(&default_entries()[..2], 10);
        assert_eq!(
            context,
            "Q: What are the office working hours?\n\
             A: Office hours are 9:30 AM - 6:30 PM, Monday to Friday.\n\
             Q: How to contact IT support?\n\
             A: Email IT at it-support@example.com or call ext. 1234."
        );
    }

    #[test]
    fn test_build_context_respects_limit() {
        let entries: Vec<FaqEntry> = (0..15)
            .map(|i| FaqEntry::new(format!("q{i}"), format!("a{i}")))
            .collect();

        let context = build_context(&entries, 10);
        assert_eq!(context.matches("Q: ").count(), 10);
        assert!(context.contains("Q: q9"));
        assert!(!context.contains("Q: q10"));
    }

    #[test]
    fn test_build_context_empty() {
        assert_eq!(build_context(&[], 10), "");
        assert_eq!(build_context(&default_entries(), 0), "");
    }
}
