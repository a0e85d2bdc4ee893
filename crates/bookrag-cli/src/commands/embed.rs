//! Embed command

use crate::app::EmbedArgs;
use bookrag_core::{chunk_document, io, Config, Embedder, HttpEmbedder, Result};

pub async fn run(args: EmbedArgs, config: &Config) -> Result<()> {
    let content = io::read_text(&args.file)?;
    let chunks = chunk_document(&content);
    let texts: Vec<String> = chunks.into_iter().map(|c| c.content).collect();

    let embedder = HttpEmbedder::new(config.llm_service.clone())?;
    let embeddings = embedder
        .embed_batch_concurrent(&texts, args.batch_size, args.concurrency)
        .await?;

    println!(
        "Embedded {} chunks with {} ({} dims)",
        embeddings.len(),
        embedder.model_name(),
        embeddings.first().map(|e| e.len()).unwrap_or(embedder.dimensions()),
    );
    Ok(())
}
