//! Routing output types.

use serde::{Deserialize, Serialize};

/// Where an answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerSource {
    /// Taken verbatim from a confident FAQ match
    Faq,
    /// Produced by the generation collaborator
    Generated,
    /// The generation collaborator failed; the answer text describes why
    Error,
}

impl AnswerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerSource::Faq => "faq",
            AnswerSource::Generated => "generated",
            AnswerSource::Error => "error",
        }
    }

    /// Label shown next to an answer in terminal output.
    pub fn label(&self) -> &'static str {
        match self {
            AnswerSource::Faq => "FAQ",
            AnswerSource::Generated => "AI",
            AnswerSource::Error => "Error",
        }
    }
}

impl std::fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final outcome of routing one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingDecision {
    pub answer_text: String,
    pub source: AnswerSource,
    pub escalate: bool,

    /// Best FAQ match score that led to this decision
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_json_shape() {
        let decision = RoutingDecision {
            answer_text: "Office hours are 9:30 AM - 6:30 PM.".to_string(),
            source: AnswerSource::Faq,
            escalate: false,
            score: 0.99,
        };

        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["answerText"], "Office hours are 9:30 AM - 6:30 PM.");
        assert_eq!(json["source"], "faq");
        assert_eq!(json["escalate"], false);
    }

    #[test]
    fn test_source_parses_lowercase() {
        let source: AnswerSource = serde_json::from_str("\"generated\"").unwrap();
        assert_eq!(source, AnswerSource::Generated);
        assert_eq!(source.to_string(), "generated");
        assert_eq!(AnswerSource::Error.label(), "Error");
    }
}
