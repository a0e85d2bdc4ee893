//! Per-chunk comprehension question generator

use crate::chunk::Chunk;
use crate::error::Result;
use crate::llm::{ChatMessage, LlmClient};
use lazy_static::lazy_static;
use rand::seq::SliceRandom;
use regex::Regex;

const QUESTION_PROMPT: &str = r#"Given a chunk from a document, generate 1-3 questions related to the chunk. Each question must be full and not require additional context.
Example output:
1. How to open new account?
2. How much BMW X5 costs?"#;

lazy_static! {
    /// Lines of the form `3. Why ...?`, matched anywhere in the reply
    static ref QUESTION_RE: Regex =
        Regex::new(r"(?m)^\s*\d+\.\s+(.*)").expect("question pattern is valid");
}

/// How many chunks to sample for question generation.
///
/// One in five, capped at 60 so long documents stay within a bounded number
/// of LLM calls.
pub fn sample_count(n: usize) -> usize {
    (n / 5).min(60)
}

/// Pull question texts out of a numbered-list reply, ignoring surrounding prose
pub fn extract_numbered_questions(reply: &str) -> Vec<String> {
    QUESTION_RE
        .captures_iter(reply)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Generate questions for a random subset of chunks, in place.
///
/// Selection is without replacement, sized by [`sample_count`]. Each selected
/// chunk gets `questions` and `idx` set; unselected chunks are left untouched,
/// so callers must tolerate partial coverage. Calls run sequentially.
pub async fn generate_questions(client: &dyn LlmClient, chunks: &mut [Chunk]) -> Result<()> {
    let n = chunks.len();
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut rand::rng());
    indices.truncate(sample_count(n));

    for idx in indices {
        let chunk = &mut chunks[idx];
        let text = format!("#{}\n{}", chunk.keywords.join(", "), chunk.content);

        let messages = vec![ChatMessage::system(QUESTION_PROMPT), ChatMessage::user(text)];
        let reply = client.chat_completion(messages).await?;

        chunk.questions = Some(extract_numbered_questions(&reply));
        chunk.idx = Some(idx);
    }

    Ok(())
}
