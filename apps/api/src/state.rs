use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::Completion;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion handle shared by both pipeline stages. Built once in `main`.
    pub llm: Arc<dyn Completion>,
    pub config: Config,
}
