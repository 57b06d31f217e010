//! Batch pipeline — extract → evaluate → rank, one document at a time.
//!
//! Documents without recoverable text are skipped. A document whose
//! evaluation fails is recorded as failed and the batch moves on.

use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::extraction::TextExtractor;
use crate::ranking::ranker::{RankedReport, TOTAL_SCORE_EXPLANATION};
use crate::scoring::ResumeScorer;

/// One uploaded resume.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub name: String,
    pub content_type: Option<String>,
    pub content: Bytes,
}

impl ResumeDocument {
    pub fn is_pdf(&self) -> bool {
        self.name.to_ascii_lowercase().ends_with(".pdf")
            || self.content_type.as_deref() == Some("application/pdf")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedDocument {
    pub document_name: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedDocument {
    pub document_name: String,
    pub error: String,
}

/// Everything one ranking run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RankingRun {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub report: RankedReport,
    pub total_score_explanation: &'static str,
    pub skipped: Vec<SkippedDocument>,
    pub failed: Vec<FailedDocument>,
}

/// Processes `documents` sequentially in the given order and ranks the survivors.
pub async fn rank_resumes(
    job_description: &str,
    documents: Vec<ResumeDocument>,
    extractor: Arc<dyn TextExtractor>,
    scorer: &ResumeScorer,
) -> RankingRun {
    let run_id = Uuid::new_v4();
    let span = info_span!("ranking_run", %run_id);

    async move {
        let total = documents.len();
        let mut evaluations = Vec::with_capacity(total);
        let mut skipped = Vec::new();
        let mut failed = Vec::new();

        for (idx, document) in documents.into_iter().enumerate() {
            info!("Processing resume {}/{}: {}", idx + 1, total, document.name);

            let resume_text = match extract_text(&document, Arc::clone(&extractor)).await {
                Ok(text) => text,
                Err(reason) => {
                    warn!("Could not extract text from {}: {reason}. Skipping.", document.name);
                    skipped.push(SkippedDocument {
                        document_name: document.name,
                        reason,
                    });
                    continue;
                }
            };

            match scorer
                .evaluate(&document.name, job_description, &resume_text)
                .await
            {
                Ok(evaluation) => evaluations.push(evaluation),
                Err(e) => {
                    error!("Evaluation of {} failed: {e}", document.name);
                    failed.push(FailedDocument {
                        document_name: document.name,
                        error: e.to_string(),
                    });
                }
            }
        }

        let report = RankedReport::from_evaluations(evaluations);
        if report.is_empty() {
            warn!("No resume could be scored in this run");
        }
        info!(
            "Processing complete: {} ranked, {} skipped, {} failed",
            report.len(),
            skipped.len(),
            failed.len()
        );

        RankingRun {
            run_id,
            generated_at: Utc::now(),
            report,
            total_score_explanation: TOTAL_SCORE_EXPLANATION,
            skipped,
            failed,
        }
    }
    .instrument(span)
    .await
}

/// Runs the blocking extractor off the async workers. `Err` carries the skip reason.
async fn extract_text(
    document: &ResumeDocument,
    extractor: Arc<dyn TextExtractor>,
) -> Result<String, String> {
    if !document.is_pdf() {
        return Err("not a PDF document".to_string());
    }

    let content = document.content.clone();
    match tokio::task::spawn_blocking(move || extractor.extract(&content)).await {
        Ok(Ok(text)) if !text.trim().is_empty() => Ok(text),
        Ok(Ok(_)) => Err("no text could be extracted, even with OCR".to_string()),
        Ok(Err(e)) => Err(e.to_string()),
        Err(e) => Err(format!("text extraction aborted: {e}")),
    }
}
