//! Shared request-handler state

use bookrag_core::{LlmClient, ServerConfig, SessionStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn LlmClient>,
    pub sessions: SessionStore,
    pub config: ServerConfig,
}
