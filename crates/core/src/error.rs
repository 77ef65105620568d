//! Error types for the helpdesk workspace.
//!
//! A single error enum covers configuration, I/O, provider, knowledge base,
//! prompt and serialization failures. Generation failures inside the router
//! are deliberately not part of this enum; they are folded into the routing
//! decision instead of being propagated.

use thiserror::Error;

/// Unified error type for helpdesk.
///
/// All fallible library functions return `Result<T, AppError>`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// LLM provider errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Knowledge base errors not covered by a more specific variant
    #[error("Knowledge error: {0}")]
    Knowledge(String),

    /// Uploaded FAQ text produced no usable question/answer pairs
    #[error("Couldn't parse FAQ text: {0}. Use Q: / A: format.")]
    Parse(String),

    /// An edit referenced an entry that does not exist
    #[error("FAQ entry {index} does not exist (knowledge base has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The query was empty after trimming
    #[error("Query is empty; enter a question or support request")]
    EmptyQuery,

    /// Prompt system errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
