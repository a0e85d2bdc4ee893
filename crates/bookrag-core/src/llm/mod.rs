//! LLM integration
//!
//! Chat completion and embedding clients for OpenAI-compatible inference
//! services (vLLM, DeepInfra, OpenAI, etc.). All callers depend on the
//! [`LlmClient`] / [`Embedder`] traits so tests can substitute a scripted
//! implementation.

mod cache;
mod client;
mod embedder;

pub use cache::{ApiMetrics, MetricsSnapshot, ResponseCache};
pub use client::{ChatMessage, HttpLlmClient, LlmClient};
pub use embedder::{Embedder, HttpEmbedder};
