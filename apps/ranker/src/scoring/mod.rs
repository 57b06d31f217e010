// Scoring pipeline: category prompts, response parsing, weighted totals.
// All model calls go through llm_client::CompletionService.

pub mod category;
pub mod evaluator;
pub mod parser;
pub mod prompts;

pub use category::{CategoryResult, ResumeEvaluation, ScoreCategory};
pub use evaluator::ResumeScorer;

/// How completions are requested and read back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Free text with "Score:" / "Explanation:" labels.
    #[default]
    Labeled,
    /// A `{score, explanation}` JSON object, labels as fallback.
    Structured,
}

/// Orchestrator settings, fixed at construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScorerConfig {
    pub response_format: ResponseFormat,
}
