//! Flat CSV export of a ranked report.
//!
//! One row per ranked document, header always written, absent category
//! scores left as empty cells. The file is replaced on every run.

use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use tempfile::NamedTempFile;
use serde::{Deserialize, Serialize};

use crate::ranking::ranker::{RankedEvaluation, RankedReport};
use crate::scoring::{CategoryResult, ScoreCategory};

/// Suggested download name for the export.
pub const EXPORT_FILE_NAME: &str = "resume_analysis_results.csv";

/// Header row, in column order.
pub const COLUMNS: [&str; 11] = [
    "File Name",
    "Semantic Score",
    "Semantic Explanation",
    "Education Score",
    "Education Explanation",
    "Experience Score",
    "Experience Explanation",
    "Certification Score",
    "Certification Explanation",
    "Total Score",
    "Rank",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "File Name")]
    pub file_name: String,
    #[serde(rename = "Semantic Score")]
    pub semantic_score: Option<u8>,
    #[serde(rename = "Semantic Explanation")]
    pub semantic_explanation: String,
    #[serde(rename = "Education Score")]
    pub education_score: Option<u8>,
    #[serde(rename = "Education Explanation")]
    pub education_explanation: String,
    #[serde(rename = "Experience Score")]
    pub experience_score: Option<u8>,
    #[serde(rename = "Experience Explanation")]
    pub experience_explanation: String,
    #[serde(rename = "Certification Score")]
    pub certification_score: Option<u8>,
    #[serde(rename = "Certification Explanation")]
    pub certification_explanation: String,
    #[serde(rename = "Total Score")]
    pub total_score: u8,
    #[serde(rename = "Rank")]
    pub rank: u32,
}

impl From<&RankedEvaluation> for ExportRow {
    fn from(row: &RankedEvaluation) -> Self {
        let eval = &row.evaluation;
        let cell = |category: ScoreCategory| -> (Option<u8>, String) {
            eval.result(category)
                .map(|r: &CategoryResult| (r.score, r.explanation.clone()))
                .unwrap_or_default()
        };
        let (semantic_score, semantic_explanation) = cell(ScoreCategory::Semantic);
        let (education_score, education_explanation) = cell(ScoreCategory::Education);
        let (experience_score, experience_explanation) = cell(ScoreCategory::Experience);
        let (certification_score, certification_explanation) = cell(ScoreCategory::Certification);

        ExportRow {
            file_name: eval.document_name().to_string(),
            semantic_score,
            semantic_explanation,
            education_score,
            education_explanation,
            experience_score,
            experience_explanation,
            certification_score,
            certification_explanation,
            total_score: eval.total_score(),
            rank: row.rank,
        }
    }
}

/// Writes header plus one row per ranked document, in rank order.
pub fn write_report<W: Write>(report: &RankedReport, writer: W) -> Result<(), csv::Error> {
    let mut out = WriterBuilder::new().has_headers(false).from_writer(writer);
    out.write_record(COLUMNS)?;
    for row in report.rows() {
        out.serialize(ExportRow::from(row))?;
    }
    out.flush()?;
    Ok(())
}

/// Replaces `path` with the report. Rows go to a temp file in the same
/// directory which is then renamed over `path`, so readers and concurrent
/// runs only ever see a complete export.
pub fn write_report_file(report: &RankedReport, path: &Path) -> Result<(), csv::Error> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut staged = NamedTempFile::new_in(dir)?;
    write_report(report, &mut staged)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| csv::Error::from(e.error))?;
    Ok(())
}
