use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Encoder, Histogram, TextEncoder, register_counter, register_counter_vec,
    register_histogram,
};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("poem_gateway_requests_total", "Total number of generation requests").unwrap();
    pub static ref MODEL_ATTEMPTS: CounterVec = register_counter_vec!(
        "poem_gateway_model_attempts_total",
        "Upstream model calls by model and outcome",
        &["model", "outcome"]
    )
    .unwrap();
    pub static ref FALLBACK_EXHAUSTED: Counter = register_counter!(
        "poem_gateway_fallback_exhausted_total",
        "Requests where every candidate model failed"
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "poem_gateway_request_latency_seconds",
        "Generation latency in seconds, across all attempts"
    )
    .unwrap();
}

pub fn record_attempt(model: &str, outcome: &str) {
    MODEL_ATTEMPTS.with_label_values(&[model, outcome]).inc();
}

// Prometheus text exposition of everything registered above
pub fn render() -> Result<String, String> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| format!("Encode error: {}", e))?;
    String::from_utf8(buffer).map_err(|e| format!("Encode error: {}", e))
}
