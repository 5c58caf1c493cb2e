use serde::{Deserialize, Serialize};
use serde_json::Value;

// ===== Inbound API formats =====

// Body of POST /api/generate-poem
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct GeneratePoemRequest {
    pub prompt: String,
}

/// The two people the promise is for. Either name may be blank.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Couple {
    #[serde(default)]
    pub bride: String,
    #[serde(default)]
    pub groom: String,
}

impl Couple {
    pub fn new(bride: impl Into<String>, groom: impl Into<String>) -> Self {
        Self {
            bride: bride.into(),
            groom: groom.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.bride.trim().is_empty() && self.groom.trim().is_empty()
    }
}

// Body of POST /api/poem
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct PoemRequest {
    pub story: String,
    #[serde(default)]
    pub names: Option<Couple>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct PoemResponse {
    pub poem: String,
    pub model: String,
}

// ===== generateContent wire format =====

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }

    pub fn instruction(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`, if the response has that shape.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

/// Pulls the generated text out of a raw provider payload.
///
/// Falls back to a top-level `text` field when the payload does not have
/// the candidate shape.
pub fn extract_text(payload: &Value) -> Option<String> {
    let from_candidates = GenerateContentResponse::deserialize(payload)
        .ok()
        .and_then(|r| r.first_text().map(str::to_string));

    from_candidates.or_else(|| payload.get("text").and_then(Value::as_str).map(str::to_string))
}
