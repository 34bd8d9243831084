#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use interview_backend::{
    build_router,
    config::Config,
    error::{Error, Result},
    services::inference_client::{GenerationRequest, InferenceTransport, TransportResponse},
    AppState,
};
use serde_json::Value as JsonValue;
use tower::ServiceExt;

#[derive(Clone)]
pub enum Reply {
    Status(u16),
    Generated(String),
    Network,
}

/// Plays back canned replies in order, repeating the last one once the
/// script runs out.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Reply>>,
    last: Mutex<Option<Reply>>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_reply(&self) -> Option<Reply> {
        let mut script = self.script.lock().unwrap();
        let mut last = self.last.lock().unwrap();
        match script.pop_front() {
            Some(reply) => {
                *last = Some(reply.clone());
                Some(reply)
            }
            None => (*last).clone(),
        }
    }
}

impl Reply {
    pub fn generated(text: &str) -> Self {
        Reply::Generated(text.to_string())
    }
}

#[async_trait]
impl InferenceTransport for ScriptedTransport {
    async fn send(&self, _api_key: &str, _request: &GenerationRequest) -> Result<TransportResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.next_reply() {
            Some(Reply::Generated(text)) => Ok(TransportResponse {
                status: 200,
                body: serde_json::json!([{ "generated_text": text }]).to_string(),
            }),
            Some(Reply::Status(code)) => Ok(TransportResponse {
                status: code,
                body: format!("{{\"error\":\"status {}\"}}", code),
            }),
            Some(Reply::Network) | None => Err(Error::Internal("connection refused".to_string())),
        }
    }
}

pub fn test_config(api_key: Option<&str>) -> Config {
    Config {
        inference_api_key: api_key.map(str::to_string),
        ..Config::default()
    }
}

pub fn app_with(transport: Arc<ScriptedTransport>, api_key: Option<&str>) -> Router {
    let state = AppState::with_transport(&test_config(api_key), transport);
    build_router(state)
}

pub async fn post_json(app: &Router, uri: &str, body: JsonValue) -> (StatusCode, JsonValue) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, json)
}

pub fn assert_question_shape(q: &JsonValue) {
    assert!(q["question"].as_str().is_some_and(|s| !s.is_empty()), "question: {q}");
    assert!(
        matches!(q["type"].as_str(), Some("technical" | "coding" | "behavioral")),
        "type: {q}"
    );
    assert!(q["expectedAnswer"].as_str().is_some(), "expectedAnswer: {q}");
}

pub fn assert_evaluation_shape(e: &JsonValue) {
    let score = e["score"].as_f64().expect("score is a number");
    assert!((0.0..=10.0).contains(&score), "score out of range: {score}");
    for key in ["review", "strength", "improvement"] {
        assert!(e[key].as_str().is_some(), "{key} missing: {e}");
    }
}
