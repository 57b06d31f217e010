use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::scoring::ResumeScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Scoring Orchestrator, bound to the Completion Service at startup.
    pub scorer: ResumeScorer,
    /// Blocking text extractor; handlers run it on the blocking pool.
    pub extractor: Arc<dyn TextExtractor>,
}
