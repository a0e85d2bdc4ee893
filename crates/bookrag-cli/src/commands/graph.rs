//! Graph command

use crate::app::{FileArgs, OutputFormat};
use bookrag_core::{estimate_tokens, io, GraphExtractor, LlmClient, Result};
use std::sync::Arc;

pub async fn run(args: FileArgs, client: Arc<dyn LlmClient>, format: OutputFormat) -> Result<()> {
    let book_text = io::read_text(&args.file)?;
    tracing::info!(tokens = estimate_tokens(&book_text), "extracting character graph");

    let extractor = GraphExtractor::new(client);
    let extracted = extractor.extract(&book_text).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&extracted)?);
        }
        OutputFormat::Cli => match extracted.graph {
            Some(graph) => {
                println!("{}", graph.title);
                println!("{}", graph.summary);
                println!();
                println!("Characters: {}", graph.nodes.len());
                for node in &graph.nodes {
                    println!("  {} ({})", node.name, node.id);
                }
                println!();
                println!("Relationships: {}", graph.links.len());
                for link in &graph.links {
                    println!("  {} -> {}: {}", link.source, link.target, link.label);
                }
            }
            None => {
                eprintln!("graph extraction failed; raw analysis follows");
                println!("{}", extracted.character_text);
            }
        },
    }
    Ok(())
}
