//! Bookrag Core Library
//!
//! Contextual-chunking RAG building blocks over hosted LLM inference.
//!
//! # Features
//! - Character-based document chunking with `### Chunk [id] ###` markers
//! - Contextual per-chunk keyword generation with a lenient reply parser
//! - Per-chunk comprehension question sampling
//! - Grounded answer synthesis over retrieved chunk text
//! - Character-relationship graph extraction from book text
//! - OpenAI-compatible chat-completion and embedding clients

pub mod chunk;
pub mod config;
pub mod error;
pub mod graph;
pub mod io;
pub mod llm;
pub mod pipeline;
pub mod session;

pub use chunk::{chunk_by_chars, chunk_document, render_chunked, Chunk};
pub use config::{Config, LlmServiceConfig, ServerConfig};
pub use error::{BookragError, Error, Result};
pub use graph::{
    estimate_tokens, extract_json_object, CharacterGraph, ChatTurn, ExtractedGraph,
    GraphExtractor, GraphLink, GraphNode,
};
pub use llm::{
    ChatMessage, Embedder, HttpEmbedder, HttpLlmClient, LlmClient, MetricsSnapshot,
};
pub use pipeline::{
    answer_question, apply_keywords, extract_numbered_questions, generate_contextual_keywords,
    generate_questions, parse_keyword_blocks, sample_count,
};
pub use session::{Session, SessionStore};

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "bookrag";

/// Session id used when a request does not name one
pub const DEFAULT_SESSION: &str = "default";
