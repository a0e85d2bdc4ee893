//! Bookrag demo HTTP service
//!
//! Two routes, mirroring the mindmap frontend's needs:
//! - `POST /inference` — multipart book upload, runs character-graph
//!   extraction, returns the graph JSON plus the raw analysis text
//! - `POST /chat` — relationship search over a previously uploaded book

mod error;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::chat::{ChatRequest, ChatResponse};
pub use routes::inference::InferenceResponse;
pub use routes::router;
pub use state::AppState;

use bookrag_core::{Config, LlmClient, SessionStore};
use std::sync::Arc;

/// Bind and serve until the process is stopped
pub async fn start_server(config: &Config, client: Arc<dyn LlmClient>) -> anyhow::Result<()> {
    let state = AppState {
        client,
        sessions: SessionStore::new(),
        config: config.server.clone(),
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    tracing::info!("bookrag server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
