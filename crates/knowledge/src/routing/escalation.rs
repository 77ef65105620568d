//! Escalation heuristics for answers that did not come from the FAQ.

/// Query fragments that signal a fault a human should look at.
pub const QUERY_ESCALATION_KEYWORDS: &[&str] = &[
    "broken",
    "not working",
    "urgent",
    "can't",
    "cannot",
    "failed",
    "error",
];

/// Answer fragments that signal the generator was unsure.
pub const ANSWER_ESCALATION_PHRASES: &[&str] = &[
    "i'm not sure",
    "i do not know",
    "i may be wrong",
    "please contact",
    "escalate",
];

/// Whether a query/answer pair should be handed to human support.
///
/// Case-insensitive substring check, so "errors" also hits "error".
pub fn should_escalate(query: &str, answer: &str) -> bool {
    let query = query.to_lowercase();
    let answer = answer.to_lowercase();

    QUERY_ESCALATION_KEYWORDS
        .iter()
        .any(|keyword| query.contains(keyword))
        || ANSWER_ESCALATION_PHRASES
            .iter()
            .any(|phrase| answer.contains(phrase))
}
