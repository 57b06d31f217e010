//! Response Parser — pulls a bounded score and an explanation out of free model text.
//!
//! Never fails: a missing score is `None`, a missing `Explanation:` label
//! gives [`NO_EXPLANATION`].

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::llm_client::strip_json_fences;

pub const NO_EXPLANATION: &str = "No explanation provided.";

/// "Score:" then 1–3 digits. No trailing boundary, so "Score: 1500" reads as 150.
static RE_LABELED_SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Score:(?:\*\*)?\s*([0-9]{1,3})").expect("valid regex"));

/// Standalone runs of 1–3 digits; see `first_standalone_number` for the sign rule.
static RE_BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9]{1,3})\b").expect("valid regex"));

/// Everything after "Explanation:", line breaks included.
static RE_EXPLANATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)Explanation:(?:\*\*)?\s*(.*)").expect("valid regex"));

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    pub score: Option<u8>,
    pub explanation: String,
}

/// Parses a labelled "Score: N ... Explanation: ..." completion.
pub fn parse_score_and_explanation(text: &str) -> ParsedResponse {
    let score = RE_LABELED_SCORE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .or_else(|| first_standalone_number(text))
        .and_then(|digits| digits.parse::<u16>().ok())
        .map(clamp_score);

    // a label with nothing after it yields "", only a missing label gets the default
    let explanation = RE_EXPLANATION
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or(NO_EXPLANATION)
        .to_string();

    ParsedResponse { score, explanation }
}

#[derive(Debug, Deserialize)]
struct StructuredResponse {
    score: Option<f64>,
    explanation: Option<String>,
}

/// Accepts a `{"score": .., "explanation": ..}` object, optionally fenced.
/// Returns `None` for anything else so the caller can fall back.
pub fn parse_structured(text: &str) -> Option<ParsedResponse> {
    let body: StructuredResponse = serde_json::from_str(strip_json_fences(text)).ok()?;
    let score = body
        .score
        .filter(|s| s.is_finite())
        .map(|s| s.round().clamp(0.0, 100.0) as u8);
    let explanation = body
        .explanation
        .map(|e| e.trim().to_string())
        .unwrap_or_else(|| NO_EXPLANATION.to_string());
    Some(ParsedResponse { score, explanation })
}

/// Structured object first, labelled text second.
pub fn parse_completion(text: &str) -> ParsedResponse {
    parse_structured(text).unwrap_or_else(|| parse_score_and_explanation(text))
}

/// A run directly preceded by '-' is a negative number, not a score.
fn first_standalone_number(text: &str) -> Option<&str> {
    RE_BARE_NUMBER
        .find_iter(text)
        .find(|m| !text[..m.start()].ends_with('-'))
        .map(|m| m.as_str())
}

fn clamp_score(raw: u16) -> u8 {
    raw.min(100) as u8
}
