use axum::{Json, extract::State};
use serde_json::Value;
use std::sync::Arc;
use tracing::error;

use crate::error::ApiError;
use crate::state::AppState;

// Passes the provider's model catalogue through unchanged
pub async fn list_models_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    state.poems.caller().list_models().await.map(Json).map_err(|e| {
        error!(error = %e, "Listing models failed");
        ApiError::new("Failed to list models", e)
    })
}
