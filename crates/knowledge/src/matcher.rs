//! Lexical matching of a query against FAQ questions.
//!
//! Two signals, checked per entry in order:
//! 1. Substring containment in either direction short-circuits the scan.
//! 2. Otherwise the token overlap ratio `|query ∩ question| / |query|`.

use crate::faq::FaqEntry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Score returned for a substring match. Also the ceiling for every score.
pub const EXACT_MATCH_SCORE: f32 = 0.99;

/// Best candidate answer for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Answer of the best entry, empty when nothing matched
    pub answer: String,

    /// Confidence in `[0, 0.99]`
    pub score: f32,
}

impl MatchResult {
    /// No candidate: empty answer, zero score.
    pub fn none() -> Self {
        Self {
            answer: String::new(),
            score: 0.0,
        }
    }

    pub fn is_match(&self) -> bool {
        self.score > 0.0
    }
}

impl Default for MatchResult {
    fn default() -> Self {
        Self::none()
    }
}

/// Lowercase and trim.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn tokens(text: &str) -> HashSet<&str> {
    text.split_whitespace().collect()
}

/// Fraction of the query's distinct tokens that also appear in the question.
///
/// Both inputs are expected to be normalized already.
pub fn overlap_score(query: &str, question: &str) -> f32 {
    let query_tokens = tokens(query);
    if query_tokens.is_empty() {
        return 0.0;
    }

    let question_tokens = tokens(question);
    let shared = query_tokens.intersection(&question_tokens).count();

    (shared as f32 / query_tokens.len() as f32).min(EXACT_MATCH_SCORE)
}

/// Either string contains the other. An empty question is contained in
/// every query.
fn is_substring_match(query: &str, question: &str) -> bool {
    question.contains(query) || query.contains(question)
}

/// Find the best FAQ answer for `query`.
///
/// The first entry with a substring relation wins outright with
/// [`EXACT_MATCH_SCORE`]. Otherwise the highest overlap wins, and ties keep
/// the earlier entry. An empty query never matches.
pub fn match_query(query: &str, entries: &[FaqEntry]) -> MatchResult {
    let query = normalize(query);
    if query.is_empty() {
        tracing::debug!("Empty query, skipping FAQ match");
        return MatchResult::none();
    }

    let mut best = MatchResult::none();

    for (index, entry) in entries.iter().enumerate() {
        let question = normalize(&entry.question);

        if is_substring_match(&query, &question) {
            tracing::debug!("Substring match on FAQ entry {}", index);
            return MatchResult {
                answer: entry.answer.clone(),
                score: EXACT_MATCH_SCORE,
            };
        }

        let score = overlap_score(&query, &question);
        if score > best.score {
            best = MatchResult {
                answer: entry.answer.clone(),
                score,
            };
        }
    }

    tracing::debug!("Best FAQ overlap score: {:.3}", best.score);
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faq::default_entries;

    fn entries(pairs: &[(&str, &str)]) -> Vec<FaqEntry> {
        pairs.iter().map(|(q, a)| FaqEntry::new(*q, *a)).collect()
    }

    #[test]
    fn test_exact_question_scores_099() {
        let faqs = default_entries();
        for entry in &faqs {
            let result = match_query(&entry.question, &faqs);
            assert_eq!(result.score, EXACT_MATCH_SCORE);
            assert_eq!(result.answer, entry.answer);
        }
    }

    #[test]
    fn test_match_ignores_case_and_padding() {
        let faqs = default_entries();
        let result = match_query("   HOW TO APPLY FOR LEAVE?  ", &faqs);
        assert_eq!(result.score, EXACT_MATCH_SCORE);
        assert!(result.answer.starts_with("Use the HR portal"));
    }

    #[test]
    fn test_query_substring_of_question() {
        let faqs = default_entries();
        let result = match_query("contact it", &faqs);
        assert_eq!(result.score, EXACT_MATCH_SCORE);
        assert!(result.answer.contains("it-support@example.com"));
    }

    #[test]
    fn test_question_substring_of_query() {
        let faqs = default_entries();
        let result = match_query("hi! how to apply for leave? thanks", &faqs);
        assert_eq!(result.score, EXACT_MATCH_SCORE);
    }

    #[test]
    fn test_substring_short_circuits_later_entries() {
        let faqs = entries(&[
            ("printer setup", "first"),
            ("printer", "second"),
            ("printer setup", "third"),
        ]);
        let result = match_query("printer", &faqs);
        assert_eq!(result.answer, "first");
    }

    #[test]
    fn test_overlap_ratio() {
        let faqs = entries(&[("reset my email password", "answer")]);
        // 2 of 4 query tokens shared
        let result = match_query("change email password today", &faqs);
        assert_eq!(result.score, 0.5);
        assert_eq!(result.answer, "answer");
    }

    #[test]
    fn test_duplicate_query_tokens_counted_once() {
        assert_eq!(overlap_score("vpn vpn down", "vpn setup"), 0.5);
    }

    #[test]
    fn test_ties_keep_earlier_entry() {
        let faqs = entries(&[
            ("vpn setup guide", "first"),
            ("vpn access form", "second"),
        ]);
        let result = match_query("vpn broken", &faqs);
        assert_eq!(result.score, 0.5);
        assert_eq!(result.answer, "first");
    }

    #[test]
    fn test_strictly_greater_replaces_best() {
        let faqs = entries(&[
            ("vpn setup guide", "first"),
            ("vpn broken again", "second"),
        ]);
        let result = match_query("vpn is broken", &faqs);
        assert_eq!(result.answer, "second");
    }

    #[test]
    fn test_disjoint_query_scores_zero() {
        let faqs = default_entries();
        let result = match_query("espresso machine descaling", &faqs);
        assert_eq!(result, MatchResult::none());
        assert!(!result.is_match());
    }

    #[test]
    fn test_empty_knowledge_base() {
        assert_eq!(match_query("anything at all", &[]), MatchResult::none());
    }

    #[test]
    fn test_empty_query_never_matches() {
        let faqs = default_entries();
        assert_eq!(match_query("", &faqs), MatchResult::none());
        assert_eq!(match_query("   \t ", &faqs), MatchResult::none());
    }

    #[test]
    fn test_empty_question_short_circuits() {
        let faqs = entries(&[("", "blank"), ("office hours", "hours")]);
        let result = match_query("what are the office hours", &faqs);
        assert_eq!(result.answer, "blank");
        assert_eq!(result.score, EXACT_MATCH_SCORE);
    }

    #[test]
    fn test_blank_question_after_earlier_match_is_never_reached() {
        let faqs = entries(&[("office hours", "hours"), ("   ", "blank")]);
        let result = match_query("what are the office hours", &faqs);
        assert_eq!(result.answer, "hours");
    }

    #[test]
    fn test_full_overlap_without_substring_is_capped() {
        let faqs = entries(&[("office hours today", "answer")]);
        let result = match_query("hours office", &faqs);
        assert_eq!(result.score, EXACT_MATCH_SCORE);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let faqs = default_entries();
        let queries = [
            "",
            "hours",
            "office working hours please",
            "how to",
            "my computer is broken what should i do?",
            "what",
            "contact support it how to?",
        ];
        for query in queries {
            let score = match_query(query, &faqs).score;
            assert!((0.0..=EXACT_MATCH_SCORE).contains(&score), "{query}: {score}");
        }
    }

    #[test]
    fn test_scenario_broken_computer_is_low_confidence() {
        let result = match_query("My computer is broken what should I do?", &default_entries());
        assert!(result.score < 0.6);
    }
}
