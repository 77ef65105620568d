//! FAQ knowledge base: entries, the `Q:`/`A:` text format and edits.
//!
//! The knowledge base is an ordered list of question/answer pairs owned by
//! the caller. Order only matters as a tie-break when matching.

use helpdesk_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// The entries used when no FAQ text has been loaded.
pub fn default_entries() -> Vec<FaqEntry> {
    vec![
        FaqEntry::new(
            "What are the office working hours?",
            "Office hours are 9:30 AM - 6:30 PM, Monday to Friday.",
        ),
        FaqEntry::new(
            "How to contact IT support?",
            "Email IT at it-support@example.com or call ext. 1234.",
        ),
        FaqEntry::new(
            "How to apply for leave?",
            "Use the HR portal -> Leave Request. Contact hr@example.com for urgent help.",
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Question,
    Answer,
}

/// Strip a case-insensitive two-character marker such as `Q:` from a line.
fn strip_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let prefix = line.get(..marker.len())?;
    if prefix.eq_ignore_ascii_case(marker) {
        Some(line[marker.len()..].trim())
    } else {
        None
    }
}

fn push_fragment(target: &mut String, fragment: &str) {
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(fragment);
}

/// Parse `Q:`/`A:` formatted text into FAQ entries.
///
/// A `Q:` line closes the previous pair, which is kept only if both its
/// question and answer are non-empty. Other non-blank lines continue
/// whichever section is open; lines before the first marker are ignored.
///
/// # Errors
/// `AppError::Parse` when no complete pair is found.
pub fn parse_faq(text: &str) -> AppResult<Vec<FaqEntry>> {
    let mut entries = Vec::new();
    let mut question = String::new();
    let mut answer = String::new();
    let mut section: Option<Section> = None;

    for raw in text.lines() {
        let line = raw.trim();

        if let Some(rest) = strip_marker(line, "q:") {
            if !question.is_empty() && !answer.is_empty() {
                entries.push(FaqEntry::new(
                    std::mem::take(&mut question),
                    std::mem::take(&mut answer),
                ));
            }
            question = rest.to_string();
            section = Some(Section::Question);
        } else if let Some(rest) = strip_marker(line, "a:") {
            answer = rest.to_string();
            section = Some(Section::Answer);
        } else if !line.is_empty() {
            match section {
                Some(Section::Question) => push_fragment(&mut question, line),
                Some(Section::Answer) => push_fragment(&mut answer, line),
                None => {}
            }
        }
    }

    if !question.is_empty() && !answer.is_empty() {
        entries.push(FaqEntry::new(question, answer));
    }

    if entries.is_empty() {
        return Err(AppError::Parse(
            "no complete question/answer pairs found".to_string(),
        ));
    }

    tracing::debug!("Parsed {} FAQ pairs", entries.len());
    Ok(entries)
}

/// Write entries back out in the `Q:`/`A:` text format.
pub fn serialize_faq(entries: &[FaqEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("Q: {}\nA: {}", entry.question, entry.answer))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Ordered, caller-owned collection of FAQ entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    entries: Vec<FaqEntry>,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new(default_entries())
    }
}

impl KnowledgeBase {
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self { entries }
    }

    /// Build a knowledge base from uploaded FAQ text.
    pub fn from_text(text: &str) -> AppResult<Self> {
        parse_faq(text).map(Self::new)
    }

    /// Build a knowledge base from a FAQ text file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let kb = Self::from_text(&text)?;
        tracing::info!("Loaded {} FAQ pairs from {:?}", kb.len(), path);
        Ok(kb)
    }

    /// Replace every entry with the pairs parsed from `text`.
    ///
    /// On a parse error the current entries are left untouched.
    pub fn reload(&mut self, text: &str) -> AppResult<usize> {
        match parse_faq(text) {
            Ok(entries) => {
                self.entries = entries;
                tracing::info!("Reloaded knowledge base with {} FAQ pairs", self.entries.len());
                Ok(self.entries.len())
            }
            Err(e) => {
                tracing::warn!(
                    "FAQ reload rejected, keeping {} entries: {}",
                    self.entries.len(),
                    e
                );
                Err(e)
            }
        }
    }

    /// Replace the entry at `index` in place.
    pub fn edit(
        &mut self,
        index: usize,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> AppResult<()> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(AppError::IndexOutOfRange { index, len })?;
        *entry = FaqEntry::new(question, answer);
        Ok(())
    }

    /// Add an entry at the end.
    pub fn append(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.entries.push(FaqEntry::new(question, answer));
    }

    /// Add a placeholder row to be filled in by a later edit.
    pub fn append_placeholder(&mut self) -> usize {
        self.append("New question", "New answer");
        self.entries.len() - 1
    }

    /// Read-only view of the entries for matching and routing.
    pub fn snapshot(&self) -> &[FaqEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&FaqEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FaqEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_text(&self) -> String {
        serialize_faq(&self.entries)
    }
}

impl<'a> IntoIterator for &'a KnowledgeBase {
    type Item = &'a FaqEntry;
    type IntoIter = std::slice::Iter<'a, FaqEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
