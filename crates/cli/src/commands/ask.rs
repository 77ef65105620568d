//! Ask command handler.
//!
//! Answers one question from the FAQ or through the generation provider.

use super::runtime::{greeting, print_decision, Runtime};
use clap::Args;
use helpdesk_core::{config::AppConfig, AppError, AppResult};

/// Ask a single question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Name used in the greeting
    #[arg(long)]
    pub name: Option<String>,

    /// Output the routing decision as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let runtime = Runtime::from_config(config)?;
        let decision = runtime.answer(&self.question).await?;

        if self.json {
            let json = serde_json::to_string_pretty(&decision)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            println!("{}", greeting(self.name.as_deref(), &self.question));
            print_decision(&decision, config);
        }

        Ok(())
    }
}
