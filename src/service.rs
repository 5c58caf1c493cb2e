use tracing::{info, warn};

use crate::cleaner::clean_poem;
use crate::error::Error;
use crate::fallback::{FallbackSuccess, ModelAttempt, ModelFallbackCaller};
use crate::models::{PoemRequest, PoemResponse, extract_text};
use crate::prompt::build_prompt;

/// Poem text used when the provider answered with a shape we cannot read.
pub const UNPARSEABLE_PLACEHOLDER: &str = "Could not parse poem from response";

#[derive(Debug)]
pub struct GeneratedPoem {
    pub poem: String,
    pub model: String,
    pub attempts: Vec<ModelAttempt>,
}

impl From<GeneratedPoem> for PoemResponse {
    fn from(generated: GeneratedPoem) -> Self {
        PoemResponse {
            poem: generated.poem,
            model: generated.model,
        }
    }
}

/// Promise in, cleaned poem out.
pub struct PoemService {
    caller: ModelFallbackCaller,
}

impl PoemService {
    pub fn new(caller: ModelFallbackCaller) -> Self {
        Self { caller }
    }

    pub fn caller(&self) -> &ModelFallbackCaller {
        &self.caller
    }

    /// Sends a ready-made prompt and returns the cleaned poem.
    pub async fn generate_poem(&self, prompt: &str) -> Result<GeneratedPoem, Error> {
        let FallbackSuccess {
            model,
            payload,
            attempts,
        } = self.caller.generate(prompt).await?;

        let raw = extract_text(&payload).unwrap_or_else(|| {
            warn!(model = %model, "Could not find poem text in response");
            UNPARSEABLE_PLACEHOLDER.to_string()
        });
        let poem = clean_poem(&raw);
        info!(model = %model, attempts = attempts.len(), lines = poem.lines().count(), "Poem generated");

        Ok(GeneratedPoem { poem, model, attempts })
    }

    /// Builds the haiku prompt for a promise, then generates.
    pub async fn compose(&self, request: &PoemRequest) -> Result<GeneratedPoem, Error> {
        let prompt = build_prompt(&request.story, request.names.as_ref());
        self.generate_poem(&prompt).await
    }
}
