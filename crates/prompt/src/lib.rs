//! Prompt system for helpdesk.
//!
//! Renders the support-assistant prompt sent with every generated answer:
//! - Built-in or YAML-defined prompt definitions
//! - Handlebars template rendering
//! - FAQ context injection

pub mod builder;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::build_prompt;
pub use loader::{load_prompt, load_prompt_or_builtin};
pub use types::{BuiltPrompt, PromptDefinition, BUILTIN_PROMPT_ID};
