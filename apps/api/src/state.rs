use std::sync::Arc;

use crate::analysis::analyzer::ResumeAnalyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    /// Model-backed analyzer. Default: `LlmClient` against OpenRouter.
    pub analyzer: Arc<dyn ResumeAnalyzer>,
    pub config: Config,
}
