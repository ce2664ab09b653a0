use reqwest::Client;

use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable: nothing here changes between requests, and no credential lives here
/// except the optional fallback key in `config`.
#[derive(Clone)]
pub struct AppState {
    /// Connection pool reused by the per-request Gemini clients.
    pub http: Client,
    pub config: Config,
}
