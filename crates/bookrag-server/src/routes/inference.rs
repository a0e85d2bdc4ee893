//! Book upload and character-graph extraction

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Multipart, State};
use axum::Json;
use bookrag_core::{estimate_tokens, CharacterGraph, GraphExtractor, DEFAULT_SESSION};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct InferenceResponse {
    /// `null` when the model's graph JSON could not be parsed
    pub graph_data: Option<CharacterGraph>,
    pub character_response_text: String,
    pub num_input_tokens: usize,
}

/// `POST /inference` — multipart upload with a required `file` part and an
/// optional `session` id part.
pub async fn handle(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<InferenceResponse>, ApiError> {
    let mut book_text: Option<String> = None;
    let mut session_id = DEFAULT_SESSION.to_string();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid(format!("Malformed multipart request: {}", e)))?
    {
        match field.name() {
            Some("file") => {
                if field.file_name().map_or(true, str::is_empty) {
                    return Err(ApiError::invalid("No file selected"));
                }
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::invalid(format!("File is not valid UTF-8 text: {}", e)))?;
                book_text = Some(text);
            }
            Some("session") => {
                session_id = field
                    .text()
                    .await
                    .map_err(|e| ApiError::invalid(format!("Malformed session field: {}", e)))?;
            }
            _ => {}
        }
    }

    let book_text = book_text.ok_or_else(|| ApiError::invalid("No file part in the request"))?;

    state.sessions.put(&session_id, &book_text);
    let num_input_tokens = estimate_tokens(&book_text);
    tracing::info!(
        session = %session_id,
        tokens = num_input_tokens,
        "running graph extraction"
    );

    let extractor = GraphExtractor::new(state.client.clone());
    let extracted = extractor.extract(&book_text).await?;

    state
        .sessions
        .set_relationship(&session_id, &extracted.character_text);

    Ok(Json(InferenceResponse {
        graph_data: extracted.graph,
        character_response_text: extracted.character_text,
        num_input_tokens,
    }))
}
