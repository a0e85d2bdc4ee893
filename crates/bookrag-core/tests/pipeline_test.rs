//! End-to-end pipeline flow against a scripted LLM client

use async_trait::async_trait;
use bookrag_core::{
    answer_question, apply_keywords, chunk_by_chars, generate_contextual_keywords,
    generate_questions, render_chunked, ChatMessage, Chunk, LlmClient, Result,
};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays canned replies and records the requests it saw
struct ScriptedClient {
    replies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedClient {
    fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn request(&self, i: usize) -> Vec<ChatMessage> {
        self.requests.lock().unwrap()[i].clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String> {
        self.requests.lock().unwrap().push(messages);
        Ok(self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

#[tokio::test]
async fn keyword_pipeline_annotates_chunks() {
    let client = ScriptedClient::new(&[
        "Here are the keywords:\n### Chunk 1 ###\nalpha, beta\n### Chunk 2 ###\ngamma",
    ]);

    let mut chunks = vec![Chunk::new("first span"), Chunk::new("second span")];
    let rendered = render_chunked(&chunks);

    let blocks = generate_contextual_keywords(&client, &rendered).await.unwrap();
    assert_eq!(blocks.len(), 2);

    apply_keywords(&mut chunks, blocks);
    assert_eq!(chunks[0].keywords, vec!["alpha", "beta"]);
    assert_eq!(chunks[1].keywords, vec!["gamma"]);

    // The single request carries the rendered markers in the user message
    assert_eq!(client.request_count(), 1);
    let request = client.request(0);
    assert_eq!(request[0].role, "system");
    assert!(request[1].content.contains("### Chunk 1 ###"));
    assert!(request[1].content.contains("second span"));
}

#[tokio::test]
async fn keyword_pipeline_tolerates_inline_reply() {
    let client = ScriptedClient::new(&["Chunk1: a, b\nChunk2: c"]);

    let blocks = generate_contextual_keywords(&client, "ignored").await.unwrap();
    assert_eq!(blocks, vec![vec!["a".to_string(), "b".to_string()], vec!["c".to_string()]]);
}

#[tokio::test]
async fn question_generation_covers_sampled_subset() {
    // 5 chunks -> exactly one sampled
    let client = ScriptedClient::new(&["1. What is alpha?\n2. Why beta?"]);

    let mut chunks: Vec<Chunk> = (0..5)
        .map(|i| {
            let mut c = Chunk::new(format!("span {}", i));
            c.keywords = vec![format!("kw{}", i)];
            c
        })
        .collect();

    generate_questions(&client, &mut chunks).await.unwrap();
    assert_eq!(client.request_count(), 1);

    let annotated: Vec<&Chunk> = chunks.iter().filter(|c| c.questions.is_some()).collect();
    assert_eq!(annotated.len(), 1);
    assert_eq!(
        annotated[0].questions.as_deref().unwrap(),
        ["What is alpha?".to_string(), "Why beta?".to_string()]
    );
    // idx points back at the chunk's own position
    let idx = annotated[0].idx.unwrap();
    assert_eq!(chunks[idx].content, annotated[0].content);

    // Prompt leads with the keyword line
    let request = client.request(0);
    assert!(request[1].content.starts_with(&format!("#kw{}", idx)));
}

#[tokio::test]
async fn question_generation_skips_tiny_documents() {
    let client = ScriptedClient::new(&[]);
    let mut chunks = vec![Chunk::new("only"), Chunk::new("four"), Chunk::new("small"), Chunk::new("spans")];

    generate_questions(&client, &mut chunks).await.unwrap();
    assert_eq!(client.request_count(), 0);
    assert!(chunks.iter().all(|c| c.questions.is_none()));
}

#[tokio::test]
async fn answer_synthesis_forwards_reply_verbatim() {
    let client = ScriptedClient::new(&["  The X5 costs 80k.  "]);

    let reply = answer_question(&client, "doc content here", "How much?").await.unwrap();
    assert_eq!(reply, "  The X5 costs 80k.  ");

    let request = client.request(0);
    assert!(request[0].content.contains("doc content here"));
    assert!(request[0].content.contains("don't know"));
    assert_eq!(request[1].content, "How much?");
}

#[tokio::test]
async fn full_document_flow() {
    let document = "Paragraph one about pricing.\n\nParagraph two about discounts.\n\nParagraph three about warranties.";
    let mut chunks = chunk_by_chars(document, 40, 8);
    let n = chunks.len();
    assert!(n >= 2);

    let keyword_reply: String = (1..=n)
        .map(|i| format!("Chunk {}: topic{}\n", i, i))
        .collect();
    let client = ScriptedClient::new(&[&keyword_reply]);

    let rendered = render_chunked(&chunks);
    let blocks = generate_contextual_keywords(&client, &rendered).await.unwrap();
    assert_eq!(blocks.len(), n);

    apply_keywords(&mut chunks, blocks);
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.keywords, vec![format!("topic{}", i + 1)]);
    }
}
