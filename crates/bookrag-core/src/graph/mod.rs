//! Character-relationship graph extraction from book text
//!
//! Two-stage flow: a descriptive character/relationship analysis pass over the
//! raw book text, then a synthesis pass that turns the analysis into the
//! `{title, summary, nodes, links}` JSON shape. The model's JSON is untrusted;
//! a failed parse gets one retry through a strict JSON-extractor re-prompt
//! before giving up with `None`.

mod prompts;

use crate::error::Result;
use crate::llm::{ChatMessage, LlmClient};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use prompts::{CHARACTER_PROMPT, JSON_PROMPT, RELATIONSHIP_PROMPT, SEARCH_PROMPT};

/// One character node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub val: u32,
}

/// One directed relationship edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub label: String,
}

/// The graph shape consumed by the mindmap frontend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharacterGraph {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub links: Vec<GraphLink>,
}

/// One prior turn of the relationship chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub sender: String,
    pub text: String,
}

impl ChatTurn {
    fn to_message(&self) -> ChatMessage {
        if self.sender == "user" {
            ChatMessage::user(&self.text)
        } else {
            ChatMessage::assistant(&self.text)
        }
    }
}

/// Result of a graph extraction run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedGraph {
    /// `None` when the model's JSON could not be parsed even after the retry
    pub graph: Option<CharacterGraph>,
    /// Raw stage-1 analysis text
    pub character_text: String,
}

/// Window between the first `{` and the last `}`, if any
pub fn extract_json_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&content[start..=end])
}

/// Rough token count at 4 chars/token; good enough for reporting input size
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4
}

/// Drives the two-stage character-graph extraction
pub struct GraphExtractor {
    client: Arc<dyn LlmClient>,
}

impl GraphExtractor {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    /// Extract a character graph from raw book text.
    ///
    /// Transport errors propagate; parse failures degrade to `graph: None`.
    pub async fn extract(&self, book_text: &str) -> Result<ExtractedGraph> {
        let messages = vec![
            ChatMessage::system(CHARACTER_PROMPT),
            ChatMessage::user(book_text),
        ];
        let character_text = self.client.chat_completion(messages).await?;
        tracing::debug!(len = character_text.len(), "character analysis received");

        let messages = vec![
            ChatMessage::system(RELATIONSHIP_PROMPT),
            ChatMessage::user(format!("Book content:\n{}", book_text)),
            ChatMessage::assistant(&character_text),
            ChatMessage::user("Generate the JSON graph with title, summary, nodes, and links."),
        ];
        let relationship_text = self.client.chat_completion(messages).await?;

        let graph = match parse_graph(&relationship_text) {
            Some(graph) => Some(graph),
            None => {
                tracing::warn!("graph reply was not valid JSON; retrying via strict extractor");
                self.reextract_json(&relationship_text).await?
            }
        };

        Ok(ExtractedGraph {
            graph,
            character_text,
        })
    }

    /// One retry: push the sloppy reply through the strict JSON extractor prompt
    async fn reextract_json(&self, reply: &str) -> Result<Option<CharacterGraph>> {
        let messages = vec![ChatMessage::system(JSON_PROMPT), ChatMessage::user(reply)];
        let strict = self.client.chat_completion(messages).await?;

        let graph = parse_graph(&strict);
        if graph.is_none() {
            tracing::error!("graph reply unparseable after strict JSON retry");
        }
        Ok(graph)
    }

    /// Answer a relationship query over the extracted data and prior turns
    pub async fn chat(
        &self,
        query: &str,
        relationship_data: &str,
        history: &[ChatTurn],
        book_text: &str,
    ) -> Result<String> {
        let mut messages = vec![
            ChatMessage::system(SEARCH_PROMPT),
            ChatMessage::assistant(book_text),
            ChatMessage::assistant(relationship_data),
        ];
        messages.extend(history.iter().map(ChatTurn::to_message));
        messages.push(ChatMessage::user(query));

        self.client.chat_completion(messages).await
    }
}

fn parse_graph(reply: &str) -> Option<CharacterGraph> {
    let json_str = extract_json_object(reply)?;
    match serde_json::from_str(json_str) {
        Ok(graph) => Some(graph),
        Err(e) => {
            tracing::debug!("graph JSON parse failed: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    const GRAPH_JSON: &str = r#"{
        "title": "T", "summary": "S",
        "nodes": [{"id": "c1", "name": "Frodo", "val": 1}],
        "links": [{"source": "c1", "target": "c1", "label": "self"}]
    }"#;

    struct ScriptedClient {
        replies: Mutex<VecDeque<String>>,
    }

    impl ScriptedClient {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            }
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedClient {
        async fn chat_completion(&self, _messages: Vec<ChatMessage>) -> Result<String> {
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

    #[test]
    fn test_extract_json_object() {
        assert_eq!(extract_json_object("{\"a\":1}"), Some("{\"a\":1}"));
        assert_eq!(
            extract_json_object("```json\n{\"a\":1}\n```"),
            Some("{\"a\":1}")
        );
        assert_eq!(extract_json_object("no json"), None);
        assert_eq!(extract_json_object("} reversed {"), None);
    }

    #[test]
    fn test_parse_graph_with_surrounding_text() {
        let reply = format!("Here is your graph:\n{}\nHope that helps!", GRAPH_JSON);
        let graph = parse_graph(&reply).unwrap();
        assert_eq!(graph.title, "T");
        assert_eq!(graph.nodes[0].name, "Frodo");
        assert_eq!(graph.links[0].label, "self");
    }

    #[test]
    fn test_parse_graph_rejects_invalid() {
        assert!(parse_graph("{not valid json}").is_none());
        assert!(parse_graph("prose only").is_none());
    }

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens(&"x".repeat(8000)), 2000);
    }

    #[test]
    fn test_chat_turn_roles() {
        let user = ChatTurn {
            sender: "user".to_string(),
            text: "q".to_string(),
        };
        let bot = ChatTurn {
            sender: "assistant".to_string(),
            text: "a".to_string(),
        };
        assert_eq!(user.to_message().role, "user");
        assert_eq!(bot.to_message().role, "assistant");
    }

    #[tokio::test]
    async fn test_extract_happy_path() {
        let client = Arc::new(ScriptedClient::new(&["analysis text", GRAPH_JSON]));
        let extractor = GraphExtractor::new(client);

        let result = extractor.extract("book text").await.unwrap();
        assert_eq!(result.character_text, "analysis text");
        let graph = result.graph.unwrap();
        assert_eq!(graph.nodes.len(), 1);
    }

    #[tokio::test]
    async fn test_extract_retries_through_strict_prompt() {
        let client = Arc::new(ScriptedClient::new(&[
            "analysis text",
            "sorry, here is prose with no braces",
            GRAPH_JSON,
        ]));
        let extractor = GraphExtractor::new(client);

        let result = extractor.extract("book text").await.unwrap();
        assert!(result.graph.is_some());
    }

    #[tokio::test]
    async fn test_extract_gives_up_after_retry() {
        let client = Arc::new(ScriptedClient::new(&[
            "analysis text",
            "still prose",
            "and more prose",
        ]));
        let extractor = GraphExtractor::new(client);

        let result = extractor.extract("book text").await.unwrap();
        assert!(result.graph.is_none());
        assert_eq!(result.character_text, "analysis text");
    }
}
