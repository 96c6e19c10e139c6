use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::generation::templates::PromptTemplates;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Generative-text seam. Production: `GeminiClient`. Tests: stubs.
    pub llm: Arc<dyn TextGenerator>,
    /// Response-format templates, loaded once at startup, never reloaded.
    pub templates: Arc<PromptTemplates>,
    pub config: Config,
}
