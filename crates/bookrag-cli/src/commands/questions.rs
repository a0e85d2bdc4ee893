//! Questions command

use crate::app::{FileArgs, OutputFormat};
use bookrag_core::{
    apply_keywords, chunk_by_chars, generate_contextual_keywords, generate_questions, io,
    render_chunked, LlmClient, Result,
};

pub async fn run(args: FileArgs, client: &dyn LlmClient, format: OutputFormat) -> Result<()> {
    let content = io::read_text(&args.file)?;
    let mut chunks = chunk_by_chars(&content, args.chunk_size, args.overlap);

    let rendered = render_chunked(&chunks);
    let blocks = generate_contextual_keywords(client, &rendered).await?;
    apply_keywords(&mut chunks, blocks);

    generate_questions(client, &mut chunks).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&chunks)?);
        }
        OutputFormat::Cli => {
            for (i, chunk) in chunks.iter().enumerate() {
                let Some(questions) = &chunk.questions else {
                    continue;
                };
                println!("Chunk {} [{}]", i + 1, chunk.keywords.join(", "));
                for (n, question) in questions.iter().enumerate() {
                    println!("  {}. {}", n + 1, question);
                }
            }
        }
    }
    Ok(())
}
