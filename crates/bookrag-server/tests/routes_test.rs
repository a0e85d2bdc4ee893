//! In-process route tests against a scripted LLM client

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use bookrag_core::{ChatMessage, LlmClient, Result, ServerConfig, SessionStore};
use bookrag_server::{router, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

const GRAPH_JSON: &str = r#"{
    "title": "Test Book",
    "summary": "A tiny book.",
    "nodes": [{"id": "c1", "name": "Ada", "val": 1}, {"id": "c2", "name": "Ben", "val": 2}],
    "links": [{"source": "c1", "target": "c2", "label": "mentor of"}]
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

fn test_state(replies: &[&str]) -> AppState {
    AppState {
        client: Arc::new(ScriptedClient::new(replies)),
        sessions: SessionStore::new(),
        config: ServerConfig::default(),
    }
}

fn multipart_body(boundary: &str, file: Option<(&str, &str)>, session: Option<&str>) -> String {
    let mut body = String::new();
    if let Some((filename, content)) = file {
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: text/plain\r\n\r\n{content}\r\n"
        ));
    }
    if let Some(id) = session {
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"session\"\r\n\r\n{id}\r\n"
        ));
    }
    body.push_str(&format!("--{boundary}--\r\n"));
    body
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn inference_returns_graph_and_token_estimate() {
    let state = test_state(&["character analysis", GRAPH_JSON]);
    let sessions = state.sessions.clone();
    let app = router(state);

    let boundary = "test-boundary";
    let body = multipart_body(boundary, Some(("book.txt", "Ada mentors Ben.")), Some("s1"));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/inference")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["character_response_text"], "character analysis");
    assert_eq!(json["graph_data"]["nodes"][0]["name"], "Ada");
    assert_eq!(json["num_input_tokens"], "Ada mentors Ben.".len() as u64 / 4);

    // Upload is kept for the follow-up chat
    let session = sessions.get("s1").unwrap();
    assert_eq!(session.book_text, "Ada mentors Ben.");
    assert_eq!(session.relationship_text.as_deref(), Some("character analysis"));
}

#[tokio::test]
async fn inference_degrades_to_null_graph() {
    // Both the graph reply and the strict retry are prose
    let state = test_state(&["analysis", "no json here", "still none"]);
    let app = router(state);

    let boundary = "test-boundary";
    let body = multipart_body(boundary, Some(("book.txt", "text")), None);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/inference")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert!(json["graph_data"].is_null());
    assert_eq!(json["character_response_text"], "analysis");
}

#[tokio::test]
async fn inference_without_file_is_bad_request() {
    let state = test_state(&[]);
    let app = router(state);

    let boundary = "test-boundary";
    let body = multipart_body(boundary, None, Some("s1"));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/inference")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert!(json["error"].as_str().unwrap().contains("file"));
}

#[tokio::test]
async fn chat_answers_over_stored_session() {
    let state = test_state(&["Ada mentors Ben."]);
    state.sessions.put("s1", "full book text");
    let app = router(state);

    let request_body = json!({
        "query": "Who mentors Ben?",
        "relationship_data": "Ada is the mentor of Ben.",
        "chat_history_data": [{"sender": "user", "text": "hi"}, {"sender": "assistant", "text": "hello"}],
        "session": "s1"
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(request_body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["response"], "Ada mentors Ben.");
}

#[tokio::test]
async fn chat_without_query_is_bad_request() {
    let state = test_state(&[]);
    state.sessions.put("default", "book");
    let app = router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"relationship_data": "data"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chat_with_unknown_session_is_not_found() {
    let state = test_state(&[]);
    let app = router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"query": "q", "relationship_data": "d", "session": "ghost"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn chat_falls_back_to_stored_relationship() {
    let state = test_state(&["stored-data answer"]);
    state.sessions.put("s1", "book");
    state.sessions.set_relationship("s1", "stored analysis");
    let app = router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"query": "q", "session": "s1"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["response"], "stored-data answer");
}
