use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use crate::error::{ApiError, Error};
use crate::metrics::{FALLBACK_EXHAUSTED, REQUEST_LATENCY, REQUEST_TOTAL};
use crate::models::{GeneratePoemRequest, PoemRequest, PoemResponse};
use crate::state::AppState;

const GENERATION_FAILED: &str = "Failed to generate poem";

fn observe_failure(err: &Error) {
    if matches!(err, Error::AllModelsFailed { .. }) {
        FALLBACK_EXHAUSTED.inc();
    }
    error!(error = %err, "Poem generation failed");
}

// Raw proxy: returns the provider payload of the first model that answers
pub async fn generate_poem_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GeneratePoemRequest>,
) -> Result<Json<Value>, ApiError> {
    REQUEST_TOTAL.inc();
    let start_time = Instant::now();

    let preview: String = payload.prompt.chars().take(50).collect();
    info!(prompt = %preview, "Proxying prompt");

    let result = state.poems.caller().generate(&payload.prompt).await;
    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

    match result {
        Ok(success) => Ok(Json(success.payload)),
        Err(e) => {
            observe_failure(&e);
            Err(ApiError::new(GENERATION_FAILED, e))
        }
    }
}

// Full flow: prompt building, fallback, extraction and cleaning
pub async fn poem_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PoemRequest>,
) -> Result<Json<PoemResponse>, ApiError> {
    REQUEST_TOTAL.inc();
    let start_time = Instant::now();

    let result = state.poems.compose(&request).await;
    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

    match result {
        Ok(generated) => Ok(Json(generated.into())),
        Err(e) => {
            observe_failure(&e);
            Err(ApiError::new(GENERATION_FAILED, e))
        }
    }
}

pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}
