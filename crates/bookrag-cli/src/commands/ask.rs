//! Ask command

use crate::app::AskArgs;
use bookrag_core::{
    answer_question, apply_keywords, chunk_by_chars, generate_contextual_keywords, io,
    render_chunked, LlmClient, Result,
};

pub async fn run(args: AskArgs, client: &dyn LlmClient) -> Result<()> {
    let content = io::read_text(&args.file)?;
    let mut chunks = chunk_by_chars(&content, args.chunk_size, args.overlap);

    let rendered = render_chunked(&chunks);
    let blocks = generate_contextual_keywords(client, &rendered).await?;
    apply_keywords(&mut chunks, blocks);

    // Keyword line + content per chunk, the same shape retrieval would hand over
    let chunks_content: String = chunks
        .iter()
        .map(|chunk| format!("\n#{}\n{}\n", chunk.keywords.join(", "), chunk.content))
        .collect();

    let answer = answer_question(client, &chunks_content, &args.question).await?;
    println!("{}", answer);
    Ok(())
}
