//! Axum route handlers for the Rankings API.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::ranking::batch::{rank_resumes, RankingRun, ResumeDocument};
use crate::ranking::export::{write_report_file, EXPORT_FILE_NAME};
use crate::state::AppState;

const JOB_DESCRIPTION_FIELD: &str = "job_description";
const RESUMES_FIELD: &str = "resumes";

#[derive(Debug, Serialize)]
pub struct RankingResponse {
    #[serde(flatten)]
    pub run: RankingRun,
    pub export_path: String,
}

/// POST /api/v1/rankings
///
/// Multipart form: one `job_description` text field and one or more `resumes` files.
/// Scores every resume, ranks them, and overwrites the export file.
pub async fn handle_rank(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<RankingResponse>, AppError> {
    let mut job_description = String::new();
    let mut documents = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some(JOB_DESCRIPTION_FIELD) => {
                job_description = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable job description: {e}")))?;
            }
            Some(RESUMES_FIELD) => {
                let name = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("resume-{}.pdf", documents.len() + 1));
                let content_type = field.content_type().map(str::to_string);
                let content = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable file {name}: {e}")))?;
                documents.push(ResumeDocument {
                    name,
                    content_type,
                    content,
                });
            }
            other => debug!("Ignoring unexpected form field {other:?}"),
        }
    }

    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter a job description!".to_string(),
        ));
    }
    if documents.is_empty() {
        return Err(AppError::Validation(
            "Please upload at least one resume!".to_string(),
        ));
    }

    info!("Ranking {} uploaded resumes", documents.len());
    let run = rank_resumes(
        &job_description,
        documents,
        Arc::clone(&state.extractor),
        &state.scorer,
    )
    .await;

    let report = run.report.clone();
    let path = state.config.export_path.clone();
    tokio::task::spawn_blocking(move || write_report_file(&report, &path))
        .await
        .context("Export task did not complete")??;
    let export_path = state.config.export_path.display().to_string();
    info!("Results written to {export_path}");

    Ok(Json(RankingResponse { run, export_path }))
}

/// GET /api/v1/rankings/export
///
/// Returns the CSV written by the most recent run.
pub async fn handle_export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let csv = match tokio::fs::read(&state.config.export_path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(
                "No ranking has been exported yet".to_string(),
            ))
        }
        Err(e) => return Err(AppError::Export(e.to_string())),
    };

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        csv,
    ))
}
