use std::time::Duration;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use thiserror::Error;

/// Failure of a single upstream call. The fallback loop records it and
/// moves on to the next model.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{model} timed out after {}s", .timeout.as_secs())]
    Timeout { model: String, timeout: Duration },

    #[error("transport error calling {model}: {message}")]
    Transport { model: String, message: String },

    #[error("{model} returned HTTP {status}")]
    Status {
        model: String,
        status: u16,
        body: Option<Value>,
    },

    #[error("{model} returned a body that is not JSON: {message}")]
    Body { model: String, message: String },
}

impl UpstreamError {
    pub fn model(&self) -> &str {
        match self {
            UpstreamError::Timeout { model, .. }
            | UpstreamError::Transport { model, .. }
            | UpstreamError::Status { model, .. }
            | UpstreamError::Body { model, .. } => model,
        }
    }

    /// The provider's error body, when it sent one.
    pub fn response_body(&self) -> Option<&Value> {
        match self {
            UpstreamError::Status { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    pub(crate) fn from_reqwest(model: &str, timeout: Duration, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout {
                model: model.to_string(),
                timeout,
            }
        } else {
            UpstreamError::Transport {
                model: model.to_string(),
                message: err.to_string(),
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("API key is not configured")]
    MissingApiKey,

    #[error("no candidate models configured")]
    NoModels,

    #[error("all {attempts} model attempts failed, last error: {last}")]
    AllModelsFailed { attempts: usize, last: UpstreamError },

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingApiKey => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> String {
        match self {
            Error::AllModelsFailed { last, .. } => last.to_string(),
            other => other.to_string(),
        }
    }

    fn upstream_body(&self) -> Option<&Value> {
        match self {
            Error::AllModelsFailed { last, .. } | Error::Upstream(last) => last.response_body(),
            _ => None,
        }
    }
}

/// An `Error` plus the summary shown to HTTP clients.
#[derive(Debug)]
pub struct ApiError {
    pub summary: &'static str,
    pub error: Error,
}

impl ApiError {
    pub fn new(summary: &'static str, error: Error) -> Self {
        Self { summary, error }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        let body = match &self.error {
            // Setup problem, not a generation failure
            Error::MissingApiKey => json!({ "error": self.error.to_string() }),
            other => {
                let mut body = json!({
                    "error": self.summary,
                    "details": other.details(),
                });
                if let Some(upstream) = other.upstream_body() {
                    body["response"] = upstream.clone();
                }
                body
            }
        };
        (status, Json(body)).into_response()
    }
}
