//! Bookrag CLI
//!
//! Contextual-chunk keyword, question and answer pipelines over hosted LLMs.

use anyhow::Result;
use bookrag_core::{Config, HttpLlmClient, LlmClient};
use clap::Parser;
use std::sync::Arc;

mod app;
mod commands;

use app::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.into()),
        )
        .init();

    let config = Config::load()?;
    let client: Arc<dyn LlmClient> = Arc::new(HttpLlmClient::new(config.llm_service.clone())?);

    let result = match cli.command {
        Commands::Keywords(args) => {
            commands::keywords::run(args, client.as_ref(), cli.format).await
        }
        Commands::Questions(args) => {
            commands::questions::run(args, client.as_ref(), cli.format).await
        }
        Commands::Ask(args) => commands::ask::run(args, client.as_ref()).await,
        Commands::Graph(args) => commands::graph::run(args, client.clone(), cli.format).await,
        Commands::Embed(args) => commands::embed::run(args, &config).await,
        Commands::Serve => bookrag_server::start_server(&config, client.clone())
            .await
            .map_err(bookrag_core::BookragError::Other),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(e.exit_code());
    }
    Ok(())
}
