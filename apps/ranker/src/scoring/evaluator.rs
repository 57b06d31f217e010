//! Scoring Orchestrator — one completion per category, parsed and folded into a total.
//!
//! Flow: render_prompt → CompletionService::complete → parse_completion →
//!       CategoryResult × 4 → ResumeEvaluation (weighted total).
//!
//! Categories are dispatched one at a time in `ScoreCategory::ALL` order.
//! A completion failure aborts the document; nothing is retried.

use std::sync::Arc;

use tracing::{debug, info};

use crate::llm_client::{CompletionService, LlmError};
use crate::scoring::category::{CategoryResult, ResumeEvaluation, ScoreCategory};
use crate::scoring::parser::parse_completion;
use crate::scoring::prompts::render_prompt;
use crate::scoring::ScorerConfig;

/// Evaluation failed because a category call did not come back.
#[derive(Debug, thiserror::Error)]
#[error("{category:?} scoring failed: {source}")]
pub struct EvaluationError {
    pub category: ScoreCategory,
    #[source]
    pub source: LlmError,
}

/// Scores resumes against a job description through a `CompletionService`.
#[derive(Clone)]
pub struct ResumeScorer {
    completion: Arc<dyn CompletionService>,
    config: ScorerConfig,
}

impl ResumeScorer {
    pub fn new(completion: Arc<dyn CompletionService>, config: ScorerConfig) -> Self {
        Self { completion, config }
    }

    /// Runs all four category prompts for one document.
    pub async fn evaluate(
        &self,
        document_name: &str,
        job_description: &str,
        resume_text: &str,
    ) -> Result<ResumeEvaluation, EvaluationError> {
        let mut results = Vec::with_capacity(ScoreCategory::ALL.len());

        for category in ScoreCategory::ALL {
            let result = self
                .score_category(category, job_description, resume_text)
                .await
                .map_err(|source| EvaluationError { category, source })?;
            debug!(
                "{document_name}: {} score={:?}",
                category.label(),
                result.score
            );
            results.push(result);
        }

        let evaluation = ResumeEvaluation::new(document_name, results);
        info!(
            "{document_name}: total score {}/100",
            evaluation.total_score()
        );
        Ok(evaluation)
    }

    async fn score_category(
        &self,
        category: ScoreCategory,
        job_description: &str,
        resume_text: &str,
    ) -> Result<CategoryResult, LlmError> {
        let prompt = render_prompt(
            category,
            job_description,
            resume_text,
            self.config.response_format,
        );
        let completion = self.completion.complete(&prompt).await?;
        let parsed = parse_completion(&completion.text);

        Ok(CategoryResult {
            category,
            score: parsed.score,
            explanation: parsed.explanation,
        })
    }
}
