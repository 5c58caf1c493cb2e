//! Wedding-promise poem gateway.
//!
//! A thin HTTP proxy in front of the Generative Language `generateContent`
//! API: it builds a haiku prompt from a promise, tries an ordered list of
//! models until one answers, and strips chatty framing from the result.

pub mod cleaner;
pub mod config;
pub mod error;
pub mod fallback;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod prompt;
pub mod service;
pub mod state;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    generate_poem_handler, health_handler, list_models_handler, method_not_allowed, metrics_handler,
    poem_handler,
};
use crate::state::AppState;

// creating the router with routes
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/generate-poem",
            post(generate_poem_handler).fallback(method_not_allowed),
        )
        .route("/api/poem", post(poem_handler).fallback(method_not_allowed))
        .route("/api/list-models", get(list_models_handler))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
