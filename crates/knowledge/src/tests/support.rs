//! Test doubles for the generation collaborator.

use crate::routing::{GenerationError, Generator};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Generator that counts calls and records what it was given.
pub struct CountingGenerator {
    reply: Result<String, GenerationError>,
    calls: AtomicUsize,
    seen: Mutex<Vec<(String, String)>>,
}

impl CountingGenerator {
    pub fn replying(text: &str) -> Self {
        Self::with_reply(Ok(text.to_string()))
    }

    pub fn failing(error: GenerationError) -> Self {
        Self::with_reply(Err(error))
    }

    fn with_reply(reply: Result<String, GenerationError>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Context passed on the most recent call.
    pub fn last_context(&self) -> Option<String> {
        self.seen
            .lock()
            .unwrap()
            .last()
            .map(|(_, context)| context.clone())
    }

    pub fn last_query(&self) -> Option<String> {
        self.seen
            .lock()
            .unwrap()
            .last()
            .map(|(query, _)| query.clone())
    }
}

#[async_trait]
impl Generator for CountingGenerator {
    async fn generate(&self, query: &str, context: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((query.to_string(), context.to_string()));
        self.reply.clone()
    }
}
