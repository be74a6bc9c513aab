//! Application state shared with request handlers.

use std::sync::Arc;

use secrecy::SecretString;

use crate::config::Config;

// ─────────────────────────────────────────────────────────────────────────────
// Application State
// ─────────────────────────────────────────────────────────────────────────────

/// State injected into axum handlers and middleware.
///
/// Holds only immutable configuration. Nothing request-scoped lives here;
/// each `/process` call owns its rows and archive outright.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The secret `X-API-Key` must match, or `None` when auth is disabled.
    pub fn api_key(&self) -> Option<&SecretString> {
        self.config.api_key.as_ref()
    }

    pub fn max_body_bytes(&self) -> usize {
        self.config.max_body_bytes
    }
}
