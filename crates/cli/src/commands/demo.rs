//! Demo command handler.

use super::runtime::{greeting, print_decision, Runtime};
use clap::Args;
use helpdesk_core::{config::AppConfig, AppResult};

/// Sample questions: one answered from the FAQ, one routed to generation.
const DEMO_QUESTIONS: [&str; 2] = [
    "What are the office working hours?",
    "My computer is broken what should I do?",
];

/// Run the built-in sample questions
#[derive(Args, Debug)]
pub struct DemoCommand {
    /// Name used in the greeting
    #[arg(long)]
    pub name: Option<String>,
}

impl DemoCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing demo command");

        let runtime = Runtime::from_config(config)?;

        for (i, question) in DEMO_QUESTIONS.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("{}", greeting(self.name.as_deref(), question));
            let decision = runtime.answer(question).await?;
            print_decision(&decision, config);
        }

        Ok(())
    }
}
