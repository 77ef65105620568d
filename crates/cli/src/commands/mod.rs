//! Command handlers for the helpdesk CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod ask;
pub mod demo;
pub mod faq;
pub mod runtime;
pub mod session;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use demo::DemoCommand;
pub use faq::FaqCommand;
pub use session::SessionCommand;
