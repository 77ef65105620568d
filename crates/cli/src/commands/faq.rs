//! FAQ command handler.
//!
//! Inspects the knowledge base without answering anything.

use super::runtime::load_knowledge_base;
use clap::{Args, Subcommand};
use helpdesk_core::{config::AppConfig, AppError, AppResult};
use helpdesk_knowledge::KnowledgeBase;
use std::path::PathBuf;

/// Inspect FAQ knowledge
#[derive(Args, Debug)]
pub struct FaqCommand {
    #[command(subcommand)]
    pub action: FaqAction,
}

#[derive(Subcommand, Debug)]
pub enum FaqAction {
    /// List the loaded FAQ entries
    Show(FaqShowCommand),
    /// Parse an FAQ file and report how many pairs it holds
    Check(FaqCheckCommand),
}

impl FaqCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        match &self.action {
            FaqAction::Show(cmd) => cmd.execute(config),
            FaqAction::Check(cmd) => cmd.execute(),
        }
    }
}

/// List the loaded FAQ entries
#[derive(Args, Debug)]
pub struct FaqShowCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl FaqShowCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing faq show command");

        let kb = load_knowledge_base(config)?;

        if self.json {
            let json = serde_json::to_string_pretty(kb.snapshot())
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            print_entries(&kb);
        }

        Ok(())
    }
}

/// Parse an FAQ file
#[derive(Args, Debug)]
pub struct FaqCheckCommand {
    /// FAQ text file in Q:/A: format
    pub file: PathBuf,
}

impl FaqCheckCommand {
    pub fn execute(&self) -> AppResult<()> {
        tracing::info!("Checking FAQ file {:?}", self.file);

        let kb = KnowledgeBase::from_file(&self.file)?;
        println!("Loaded {} FAQ pairs.", kb.len());

        Ok(())
    }
}

pub fn print_entries(kb: &KnowledgeBase) {
    if kb.is_empty() {
        println!("No FAQ entries loaded.");
        return;
    }

    for (i, entry) in kb.iter().enumerate() {
        println!("[{}] Q: {}", i, entry.question);
        println!("    A: {}", entry.answer);
    }
}
