mod generate;
mod health;
mod list_models;
mod metrics;

pub use generate::{generate_poem_handler, method_not_allowed, poem_handler};
pub use health::health_handler;
pub use list_models::list_models_handler;
pub use metrics::metrics_handler;
