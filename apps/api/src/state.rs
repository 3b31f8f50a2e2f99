use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable text generator. Production wires in `LlmClient`.
    pub llm: Arc<dyn TextGenerator>,
    pub config: Config,
}

#[cfg(test)]
impl AppState {
    /// State with a fixed config and the given generator in place of the real client.
    pub fn for_tests(llm: impl TextGenerator + 'static) -> Self {
        Self {
            llm: Arc::new(llm),
            config: Config {
                gemini_api_key: "test-key".to_string(),
                gemini_api_base: "http://localhost:0".to_string(),
                port: 0,
                rust_log: "info".to_string(),
                max_photo_bytes: 64 * 1024,
            },
        }
    }
}
