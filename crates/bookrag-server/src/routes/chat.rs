//! Relationship search over an uploaded book

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use bookrag_core::{ChatTurn, GraphExtractor, DEFAULT_SESSION};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub query: String,

    /// Relationship data the frontend got back from `/inference`; falls back
    /// to the analysis stored in the session when omitted
    #[serde(default)]
    pub relationship_data: String,

    #[serde(default)]
    pub chat_history_data: Vec<ChatTurn>,

    #[serde(default)]
    pub session: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// `POST /chat`
pub async fn handle(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if request.query.trim().is_empty() {
        return Err(ApiError::invalid("query and relationship_data are required"));
    }

    let session_id = request.session.as_deref().unwrap_or(DEFAULT_SESSION);
    let session = state.sessions.get_required(session_id)?;

    let relationship_data = if !request.relationship_data.trim().is_empty() {
        request.relationship_data
    } else {
        session
            .relationship_text
            .clone()
            .ok_or_else(|| ApiError::invalid("query and relationship_data are required"))?
    };

    let extractor = GraphExtractor::new(state.client.clone());
    let response = extractor
        .chat(
            &request.query,
            &relationship_data,
            &request.chat_history_data,
            &session.book_text,
        )
        .await?;

    Ok(Json(ChatResponse { response }))
}
