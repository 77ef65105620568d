//! Interactive session handler.
//!
//! Reads lines from stdin. Lines starting with `:` edit the knowledge base,
//! everything else is answered as a query against the current entries.

use super::faq::print_entries;
use super::runtime::{greeting, print_decision, Runtime};
use clap::Args;
use helpdesk_core::{config::AppConfig, AppResult};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "Commands: :list, :add Q | A, :new, :edit N Q | A, :load FILE, :quit. \
Anything else is a question.";

/// Start an interactive question/edit loop
#[derive(Args, Debug)]
pub struct SessionCommand {
    /// Name used in the greeting
    #[arg(long)]
    pub name: Option<String>,
}

/// One parsed line of session input.
#[derive(Debug, Clone, PartialEq)]
enum SessionInput {
    List,
    Add { question: String, answer: String },
    New,
    Edit {
        index: usize,
        question: String,
        answer: String,
    },
    Load(PathBuf),
    Quit,
    Help,
    Query(String),
    Invalid(String),
    Empty,
}

fn split_pair(rest: &str) -> Option<(String, String)> {
    let (question, answer) = rest.split_once('|')?;
    let (question, answer) = (question.trim(), answer.trim());
    if question.is_empty() || answer.is_empty() {
        return None;
    }
    Some((question.to_string(), answer.to_string()))
}

fn parse_input(line: &str) -> SessionInput {
    let line = line.trim();
    if line.is_empty() {
        return SessionInput::Empty;
    }

    let Some(command) = line.strip_prefix(':') else {
        return SessionInput::Query(line.to_string());
    };

    let (name, rest) = command
        .split_once(char::is_whitespace)
        .map(|(name, rest)| (name, rest.trim()))
        .unwrap_or((command, ""));

    match name {
        "list" => SessionInput::List,
        "new" => SessionInput::New,
        "quit" | "q" | "exit" => SessionInput::Quit,
        "help" => SessionInput::Help,
        "add" => match split_pair(rest) {
            Some((question, answer)) => SessionInput::Add { question, answer },
            None => SessionInput::Invalid("Usage: :add QUESTION | ANSWER".to_string()),
        },
        "edit" => {
            let parsed = rest.split_once(char::is_whitespace).and_then(|(index, pair)| {
                let index = index.parse::<usize>().ok()?;
                let (question, answer) = split_pair(pair)?;
                Some(SessionInput::Edit {
                    index,
                    question,
                    answer,
                })
            });
            parsed.unwrap_or_else(|| {
                SessionInput::Invalid("Usage: :edit INDEX QUESTION | ANSWER".to_string())
            })
        }
        "load" if !rest.is_empty() => SessionInput::Load(PathBuf::from(rest)),
        "load" => SessionInput::Invalid("Usage: :load FILE".to_string()),
        other => SessionInput::Invalid(format!("Unknown command ':{}'. {}", other, HELP)),
    }
}

impl SessionCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Starting interactive session");

        let mut runtime = Runtime::from_config(config)?;
        println!("Loaded {} FAQ pairs. {}", runtime.kb.len(), HELP);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match parse_input(&line) {
                SessionInput::Empty => {}
                SessionInput::Quit => break,
                SessionInput::Help => println!("{}", HELP),
                SessionInput::Invalid(message) => println!("{}", message),
                SessionInput::List => print_entries(&runtime.kb),
                SessionInput::Add { question, answer } => {
                    runtime.kb.append(question, answer);
                    println!("Added entry {}.", runtime.kb.len() - 1);
                }
                SessionInput::New => {
                    let index = runtime.kb.append_placeholder();
                    println!("Added placeholder entry {}. Fill it in with :edit.", index);
                }
                SessionInput::Edit {
                    index,
                    question,
                    answer,
                } => match runtime.kb.edit(index, question, answer) {
                    Ok(()) => println!("Updated entry {}.", index),
                    Err(e) => println!("{}", e),
                },
                SessionInput::Load(path) => load_file(&mut runtime, &path).await,
                SessionInput::Query(query) => {
                    println!("{}", greeting(self.name.as_deref(), &query));
                    match runtime.answer(&query).await {
                        Ok(decision) => print_decision(&decision, config),
                        Err(e) => println!("{}", e),
                    }
                }
            }
        }

        tracing::info!("Session ended");
        Ok(())
    }
}

/// Replace the knowledge base from a file, keeping the old one on failure.
async fn load_file(runtime: &mut Runtime, path: &Path) {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) => {
            println!("Couldn't read {}: {}", path.display(), e);
            return;
        }
    };

    match runtime.kb.reload(&text) {
        Ok(count) => println!("Loaded {} FAQ pairs.", count),
        Err(e) => println!("{} Keeping the previous {} entries.", e, runtime.kb.len()),
    }
}
