//! Sequential failover across an ordered list of model identifiers.
//!
//! Each model is called exactly once, in order. The first well-formed
//! success wins; if every model fails the last error is reported.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::GatewayConfig;
use crate::error::{Error, UpstreamError};
use crate::metrics::record_attempt;
use crate::models::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};
use crate::prompt::SYSTEM_INSTRUCTION;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// How one model call ended.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelAttempt {
    pub model: String,
    pub outcome: AttemptOutcome,
}

/// The payload returned by the first model that answered.
#[derive(Debug)]
pub struct FallbackSuccess {
    pub model: String,
    /// Provider JSON, untouched.
    pub payload: Value,
    /// Every attempt made, the successful one last.
    pub attempts: Vec<ModelAttempt>,
}

pub struct ModelFallbackCaller {
    client: reqwest::Client,
    api_key: Option<String>,
    api_base: String,
    models: Vec<String>,
    timeout: Duration,
    generation: GenerationConfig,
}

impl ModelFallbackCaller {
    pub fn new(client: reqwest::Client, config: GatewayConfig) -> Self {
        Self {
            client,
            api_key: config.api_key,
            api_base: config.api_base,
            models: config.models,
            timeout: config.timeout,
            generation: config.generation,
        }
    }

    /// Runs the prompt against each model in turn until one succeeds.
    pub async fn generate(&self, prompt: &str) -> Result<FallbackSuccess, Error> {
        let api_key = self.api_key.as_deref().ok_or(Error::MissingApiKey)?;
        if self.models.is_empty() {
            return Err(Error::NoModels);
        }

        let request = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            generation_config: Some(self.generation.clone()),
            system_instruction: Some(Content::instruction(SYSTEM_INSTRUCTION)),
        };

        let mut attempts = Vec::with_capacity(self.models.len());
        let mut last_error = None;
        let mut index = 0;
        while index < self.models.len() {
            let model = &self.models[index];
            info!(model = %model, attempt = index + 1, "Trying model");

            match self.call_model(model, api_key, &request).await {
                Ok(payload) => {
                    record_attempt(model, "success");
                    attempts.push(ModelAttempt {
                        model: model.clone(),
                        outcome: AttemptOutcome::Succeeded,
                    });
                    return Ok(FallbackSuccess {
                        model: model.clone(),
                        payload,
                        attempts,
                    });
                }
                Err(e) => {
                    record_attempt(model, "failure");
                    warn!(model = %model, error = %e, "Model attempt failed");
                    if let Some(body) = e.response_body() {
                        debug!(model = %model, response = %body, "Upstream error body");
                    }
                    attempts.push(ModelAttempt {
                        model: model.clone(),
                        outcome: AttemptOutcome::Failed(e.to_string()),
                    });
                    last_error = Some(e);
                }
            }
            index += 1;
        }

        match last_error {
            Some(last) => Err(Error::AllModelsFailed {
                attempts: attempts.len(),
                last,
            }),
            None => Err(Error::NoModels),
        }
    }

    async fn call_model(
        &self,
        model: &str,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<Value, UpstreamError> {
        let url = format!("{}/models/{}:generateContent", self.api_base, url_model_name(model));
        debug!(url = %url, "Calling generateContent");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(model, self.timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            // Best effort: keep the provider's error body when it is JSON
            let body = response.json::<Value>().await.ok();
            return Err(UpstreamError::Status {
                model: model.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::from_reqwest(model, self.timeout, e))?;
        let payload: Value = serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Body {
            model: model.to_string(),
            message: e.to_string(),
        })?;

        let parsed = GenerateContentResponse::deserialize(&payload).ok();
        match parsed.as_ref().and_then(GenerateContentResponse::first_text) {
            Some(text) => debug!(model = %model, chars = text.chars().count(), "Generated text received"),
            None => warn!(model = %model, "Response has no candidate text; passing raw payload through"),
        }

        Ok(payload)
    }

    /// Lists the models the key can see. One call, no fallback.
    pub async fn list_models(&self) -> Result<Value, Error> {
        const LIST: &str = "list-models";
        let api_key = self.api_key.as_deref().ok_or(Error::MissingApiKey)?;
        let url = format!("{}/models", self.api_base);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, api_key)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(LIST, self.timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<Value>().await.ok();
            return Err(UpstreamError::Status {
                model: LIST.to_string(),
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let payload = response.json::<Value>().await.map_err(|e| UpstreamError::Body {
            model: LIST.to_string(),
            message: e.to_string(),
        })?;
        Ok(payload)
    }
}

// "models/gemma-3-27b-it" -> "gemma-3-27b-it"
pub fn url_model_name(model: &str) -> &str {
    model.strip_prefix("models/").unwrap_or(model)
}
