//! Score categories, their fixed weights, and the per-document evaluation record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One dimension the model is asked to score. Declaration order is the
/// dispatch order and the export column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    Semantic,
    Education,
    Experience,
    Certification,
}

impl ScoreCategory {
    pub const ALL: [ScoreCategory; 4] = [
        ScoreCategory::Semantic,
        ScoreCategory::Education,
        ScoreCategory::Experience,
        ScoreCategory::Certification,
    ];

    /// Weight in tenths. Kept integral so the weighted total is exact.
    pub const fn weight_tenths(self) -> u32 {
        match self {
            ScoreCategory::Semantic => 4,
            ScoreCategory::Experience => 3,
            ScoreCategory::Education => 2,
            ScoreCategory::Certification => 1,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ScoreCategory::Semantic => "Semantic",
            ScoreCategory::Education => "Education",
            ScoreCategory::Experience => "Experience",
            ScoreCategory::Certification => "Certification",
        }
    }
}

/// Parsed outcome of one (document, category) completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub category: ScoreCategory,
    /// `None` when the completion held no usable number.
    pub score: Option<u8>,
    pub explanation: String,
}

impl CategoryResult {
    /// Score as it enters the weighted total: absent counts as 0.
    pub fn effective_score(&self) -> u8 {
        self.score.unwrap_or(0).min(100)
    }
}

/// All four category results for one document plus the weighted total.
/// The total is computed once in `new` and cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeEvaluation {
    document_name: String,
    results: BTreeMap<ScoreCategory, CategoryResult>,
    total_score: u8,
}

impl ResumeEvaluation {
    pub fn new(document_name: impl Into<String>, results: Vec<CategoryResult>) -> Self {
        let results: BTreeMap<_, _> = results.into_iter().map(|r| (r.category, r)).collect();
        let total_score = weighted_total(&results);
        Self {
            document_name: document_name.into(),
            results,
            total_score,
        }
    }

    pub fn document_name(&self) -> &str {
        &self.document_name
    }

    pub fn total_score(&self) -> u8 {
        self.total_score
    }

    pub fn result(&self, category: ScoreCategory) -> Option<&CategoryResult> {
        self.results.get(&category)
    }
}

/// round(0.4·Semantic + 0.3·Experience + 0.2·Education + 0.1·Certification).
///
/// Computed exactly in tenths; exact halves round to the even neighbour.
/// A floating-point sum of the same terms can land just above or below a
/// half (0.2·1 + 0.1·23 = 2.5000000000000004) and round the other way;
/// this never does. A missing category contributes 0.
pub fn weighted_total(results: &BTreeMap<ScoreCategory, CategoryResult>) -> u8 {
    let tenths: u32 = ScoreCategory::ALL
        .iter()
        .map(|c| {
            let score = results.get(c).map(CategoryResult::effective_score).unwrap_or(0);
            c.weight_tenths() * u32::from(score)
        })
        .sum();

    let (whole, rem) = (tenths / 10, tenths % 10);
    let rounded = if rem > 5 || (rem == 5 && whole % 2 == 1) {
        whole + 1
    } else {
        whole
    };
    // weights sum to 10 tenths and every score is ≤ 100
    rounded.min(100) as u8
}
