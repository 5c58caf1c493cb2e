use std::time::Duration;

use clap::Parser;

use crate::error::Error;
use crate::models::GenerationConfig;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODELS: &str = "models/gemma-3-27b-it,models/gemma-3-12b-it";

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "poem-gateway")]
#[command(about = "Turns a wedding promise into a haiku via the Gemma API")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    // Secret for the generative-language API
    #[arg(long, env = "GEMMA_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "GEMMA_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    // Models to try, in order (comma-separated)
    // Example: "models/gemma-3-27b-it,models/gemma-3-12b-it"
    #[arg(short, long, env = "GEMMA_MODELS", default_value = DEFAULT_MODELS)]
    pub models: String,

    // Per-attempt timeout in seconds
    #[arg(short, long, default_value_t = 10)]
    pub timeout_secs: u64,

    #[arg(long, default_value_t = 0.7)]
    pub temperature: f32,

    #[arg(long, default_value_t = 40)]
    pub top_k: u32,

    #[arg(long, default_value_t = 0.95)]
    pub top_p: f32,

    #[arg(long, default_value_t = 1024)]
    pub max_output_tokens: u32,
}

/// Everything the fallback caller needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub models: Vec<String>,
    pub timeout: Duration,
    pub generation: GenerationConfig,
}

impl GatewayConfig {
    pub fn from_args(args: &Args) -> Result<Self, Error> {
        let models = parse_models(&args.models);
        if models.is_empty() {
            return Err(Error::InvalidConfiguration(
                "at least one model identifier is required".to_string(),
            ));
        }
        if args.timeout_secs == 0 {
            return Err(Error::InvalidConfiguration(
                "timeout must be at least one second".to_string(),
            ));
        }

        let api_key = args
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string);

        Ok(Self {
            api_key,
            api_base: args.api_base.trim_end_matches('/').to_string(),
            models,
            timeout: Duration::from_secs(args.timeout_secs),
            generation: GenerationConfig {
                temperature: Some(args.temperature),
                top_k: Some(args.top_k),
                top_p: Some(args.top_p),
                max_output_tokens: Some(args.max_output_tokens),
            },
        })
    }
}

// Split "models/a, models/b" into an ordered list, dropping blanks
pub fn parse_models(models: &str) -> Vec<String> {
    models
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Shows the first five and last four characters of a secret, e.g. `AIzaS...x9Qk`.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 9 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..5].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
