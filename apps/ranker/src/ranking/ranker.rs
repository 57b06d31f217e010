//! Dense ranking of evaluated resumes by total score.

use std::cmp::Reverse;

use serde::Serialize;

use crate::scoring::ResumeEvaluation;

/// Explanation attached to the total column.
pub const TOTAL_SCORE_EXPLANATION: &str = "Overall weighted score based on Semantic (40%), \
    Experience (30%), Education (20%), and Certification (10%).";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEvaluation {
    pub rank: u32,
    #[serde(flatten)]
    pub evaluation: ResumeEvaluation,
}

/// Evaluations sorted by rank ascending. Rebuilt from scratch for every run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankedReport {
    rows: Vec<RankedEvaluation>,
}

impl RankedReport {
    /// Equal totals share a rank and the next distinct total takes the next
    /// integer. Rows with the same rank keep their input order.
    pub fn from_evaluations(evaluations: Vec<ResumeEvaluation>) -> Self {
        let totals: Vec<u8> = evaluations.iter().map(|e| e.total_score()).collect();
        let ranks = dense_ranks(&totals);

        let mut rows: Vec<RankedEvaluation> = evaluations
            .into_iter()
            .zip(ranks)
            .map(|(evaluation, rank)| RankedEvaluation { rank, evaluation })
            .collect();
        rows.sort_by_key(|r| r.rank);

        Self { rows }
    }

    pub fn rows(&self) -> &[RankedEvaluation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Dense ranks for `totals`, highest total = 1, in input order.
pub fn dense_ranks(totals: &[u8]) -> Vec<u32> {
    let mut distinct = totals.to_vec();
    distinct.sort_unstable_by_key(|&t| Reverse(t));
    distinct.dedup();

    totals
        .iter()
        .map(|t| {
            // distinct always contains t
            distinct.iter().position(|d| d == t).unwrap_or(0) as u32 + 1
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{CategoryResult, ScoreCategory};

    fn eval(name: &str, score: u8) -> ResumeEvaluation {
        ResumeEvaluation::new(
            name,
            ScoreCategory::ALL
                .iter()
                .map(|&category| CategoryResult {
                    category,
                    score: Some(score),
                    explanation: String::new(),
                })
                .collect(),
        )
    }

    #[test]
    fn test_ties_share_rank_without_gap() {
        assert_eq!(dense_ranks(&[70, 70, 65]), vec![1, 1, 2]);
    }

    #[test]
    fn test_dense_ranks_follow_input_order() {
        assert_eq!(dense_ranks(&[10, 90, 50, 90, 10]), vec![3, 1, 2, 1, 3]);
    }

    #[test]
    fn test_dense_ranks_empty() {
        assert!(dense_ranks(&[]).is_empty());
    }

    #[test]
    fn test_report_sorted_by_rank() {
        let report = RankedReport::from_evaluations(vec![
            eval("low.pdf", 20),
            eval("high.pdf", 90),
            eval("mid.pdf", 55),
        ]);

        let order: Vec<_> = report
            .rows()
            .iter()
            .map(|r| (r.evaluation.document_name(), r.rank))
            .collect();
        assert_eq!(order, vec![("high.pdf", 1), ("mid.pdf", 2), ("low.pdf", 3)]);
    }

    #[test]
    fn test_report_ties_keep_input_order() {
        let report = RankedReport::from_evaluations(vec![
            eval("b.pdf", 70),
            eval("c.pdf", 65),
            eval("a.pdf", 70),
        ]);

        let order: Vec<_> = report
            .rows()
            .iter()
            .map(|r| (r.evaluation.document_name(), r.rank))
            .collect();
        assert_eq!(order, vec![("b.pdf", 1), ("a.pdf", 1), ("c.pdf", 2)]);
    }

    #[test]
    fn test_empty_report() {
        let report = RankedReport::from_evaluations(vec![]);
        assert!(report.is_empty());
        assert_eq!(report.len(), 0);
    }

    #[test]
    fn test_row_serializes_flat() {
        let report = RankedReport::from_evaluations(vec![eval("solo.pdf", 42)]);
        let json = serde_json::to_value(&report.rows()[0]).unwrap();
        assert_eq!(json["rank"], 1);
        assert_eq!(json["document_name"], "solo.pdf");
        assert_eq!(json["total_score"], 42);
        assert_eq!(json["results"]["semantic"]["score"], 42);
    }
}
