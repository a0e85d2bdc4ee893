//! Grounded answer synthesis over retrieved chunk text

use crate::error::Result;
use crate::llm::{ChatMessage, LlmClient};

const ANSWER_PROMPT: &str = "If the answer is not given below, say that you don't know it. Make sure to copy answers from the documents without changing them.";

/// Answer a question from concatenated retrieved-chunk text.
///
/// The reply is returned unmodified; no grounding validation happens here.
pub async fn answer_question(
    client: &dyn LlmClient,
    chunks_content: &str,
    question: &str,
) -> Result<String> {
    let system_prompt = format!("{}{}", ANSWER_PROMPT, chunks_content);

    let messages = vec![
        ChatMessage::system(system_prompt),
        ChatMessage::user(question),
    ];

    client.chat_completion(messages).await
}
