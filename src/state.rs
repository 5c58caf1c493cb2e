use crate::config::GatewayConfig;
use crate::fallback::ModelFallbackCaller;
use crate::service::PoemService;

// app's shared state
pub struct AppState {
    pub poems: PoemService,
}

impl AppState {
    // One reqwest client (connection pool) shared by every request
    pub fn new(config: GatewayConfig) -> Self {
        let caller = ModelFallbackCaller::new(reqwest::Client::new(), config);
        Self {
            poems: PoemService::new(caller),
        }
    }
}
