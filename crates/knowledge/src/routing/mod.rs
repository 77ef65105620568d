//! Routing of a matched query to an answer source.
//!
//! Confident FAQ matches are answered directly. Everything else goes to the
//! generation collaborator once, with the leading FAQ entries as context.

pub mod escalation;
pub mod generator;
pub mod router;
pub mod types;

pub use escalation::{should_escalate, ANSWER_ESCALATION_PHRASES, QUERY_ESCALATION_KEYWORDS};
pub use generator::{GenerationError, Generator, LlmGenerator, ERROR_PREFIX};
pub use router::{build_context, Router, DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_CONTEXT_ENTRIES};
pub use types::{AnswerSource, RoutingDecision};
