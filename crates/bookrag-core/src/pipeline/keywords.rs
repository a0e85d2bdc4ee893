//! Contextual-keyword pipeline

use crate::chunk::Chunk;
use crate::error::Result;
use crate::llm::{ChatMessage, LlmClient};
use crate::pipeline::parse_keyword_blocks;

const KEYWORD_PROMPT: &str = r#"Each chunk is separated as ### Chunk [id] ###. For each chunk generate keywords required to fully understand the chunk without any need for looking at the previous chunks. Don't just say "List of services", because it is unclear what services you are referring to. Make sure to cover all chunks.
Sample output:
Chunk 1: BMW X5, pricings in France
Chunk 2: BMW X5, discounts"#;

/// Ask the LLM for per-chunk context keywords over a whole chunked document.
///
/// `chunked_content` is the document with its `### Chunk [id] ###` markers
/// already rendered (see [`crate::chunk::render_chunked`]). One request, reply
/// parsed leniently; the returned block count is not checked against the
/// chunk count here.
pub async fn generate_contextual_keywords(
    client: &dyn LlmClient,
    chunked_content: &str,
) -> Result<Vec<Vec<String>>> {
    let messages = vec![
        ChatMessage::system(KEYWORD_PROMPT),
        ChatMessage::user(chunked_content),
    ];

    let reply = client.chat_completion(messages).await?;
    tracing::debug!(reply_len = reply.len(), "keyword reply received");

    Ok(parse_keyword_blocks(&reply))
}

/// Pair keyword blocks onto chunks positionally.
///
/// The parser gives no guarantee the counts line up; extra blocks are ignored
/// and missing ones leave chunks with empty keywords. A mismatch is logged,
/// never an error.
pub fn apply_keywords(chunks: &mut [Chunk], blocks: Vec<Vec<String>>) {
    if blocks.len() != chunks.len() {
        tracing::warn!(
            chunks = chunks.len(),
            keyword_blocks = blocks.len(),
            "keyword block count does not match chunk count; pairing positionally"
        );
    }

    for (chunk, keywords) in chunks.iter_mut().zip(blocks) {
        chunk.keywords = keywords;
    }
}
