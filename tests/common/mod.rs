//! Fake generateContent upstream and helpers shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};

use poem_gateway::config::GatewayConfig;
use poem_gateway::models::GenerationConfig;
use poem_gateway::state::AppState;

pub const TEST_KEY: &str = "test-key-0123456789";

/// How the fake upstream answers for one model.
#[derive(Clone)]
pub enum Reply {
    Json(u16, Value),
    Text(u16, &'static str),
    Slow(Duration, Value),
}

/// One generateContent call as the upstream saw it.
#[derive(Clone, Debug)]
pub struct Call {
    pub model: String,
    pub api_key: Option<String>,
    pub body: Value,
}

struct FakeState {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<Call>>,
}

pub struct FakeUpstream {
    /// Value for `api_base`, e.g. `http://127.0.0.1:40000/v1beta`.
    pub base: String,
    state: Arc<FakeState>,
}

impl FakeUpstream {
    pub fn calls(&self) -> Vec<Call> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn called_models(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.model).collect()
    }
}

pub fn candidate(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP"
        }],
        "modelVersion": "fake"
    })
}

async fn generate(
    State(fake): State<Arc<FakeState>>,
    Path(action): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let model = action.split(':').next().unwrap_or_default().to_string();
    let api_key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    fake.calls.lock().unwrap().push(Call {
        model: model.clone(),
        api_key,
        body,
    });

    match fake.replies.get(&model).cloned() {
        Some(Reply::Json(status, value)) => {
            (StatusCode::from_u16(status).unwrap(), Json(value)).into_response()
        }
        Some(Reply::Text(status, text)) => (StatusCode::from_u16(status).unwrap(), text).into_response(),
        Some(Reply::Slow(delay, value)) => {
            tokio::time::sleep(delay).await;
            Json(value).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "code": 404, "message": "model not found" } })),
        )
            .into_response(),
    }
}

async fn list(headers: HeaderMap) -> Response {
    if headers.get("x-goog-api-key").is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!({ "models": [{ "name": "models/m1" }, { "name": "models/m2" }] })).into_response()
}

pub async fn spawn_upstream(replies: Vec<(&str, Reply)>) -> FakeUpstream {
    let state = Arc::new(FakeState {
        replies: replies.into_iter().map(|(m, r)| (m.to_string(), r)).collect(),
        calls: Mutex::new(Vec::new()),
    });
    let router = Router::new()
        .route("/v1beta/models", get(list))
        .route("/v1beta/models/{action}", post(generate))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    FakeUpstream {
        base: format!("http://{addr}/v1beta"),
        state,
    }
}

pub fn config(api_base: &str, models: &[&str]) -> GatewayConfig {
    GatewayConfig {
        api_key: Some(TEST_KEY.to_string()),
        api_base: api_base.to_string(),
        models: models.iter().map(|m| m.to_string()).collect(),
        timeout: Duration::from_secs(2),
        generation: GenerationConfig {
            temperature: Some(0.7),
            top_k: Some(40),
            top_p: Some(0.95),
            max_output_tokens: Some(1024),
        },
    }
}

/// Starts the gateway itself and returns its base URL.
pub async fn spawn_gateway(config: GatewayConfig) -> String {
    let router = poem_gateway::app(Arc::new(AppState::new(config)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
