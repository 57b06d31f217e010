use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MODEL;
use crate::scoring::ResponseFormat;

/// Application configuration loaded from environment variables.
/// Startup fails if the Gemini API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub response_format: ResponseFormat,
    pub export_path: PathBuf,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let structured = optional_env("STRUCTURED_OUTPUT")
            .map(|v| parse_bool(&v))
            .transpose()
            .context("STRUCTURED_OUTPUT must be true or false")?
            .unwrap_or(false);

        let max_upload_bytes = optional_env("MAX_UPLOAD_MB")
            .unwrap_or_else(|| "25".to_string())
            .parse::<usize>()
            .context("MAX_UPLOAD_MB must be a whole number of megabytes")
            .and_then(megabytes_to_bytes)?;

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_model: optional_env("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            response_format: if structured {
                ResponseFormat::Structured
            } else {
                ResponseFormat::Labeled
            },
            export_path: optional_env("EXPORT_PATH")
                .unwrap_or_else(|| "resume_analysis_results.csv".to_string())
                .into(),
            max_upload_bytes,
            port: optional_env("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    optional_env(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank values are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn megabytes_to_bytes(mb: usize) -> Result<usize> {
    mb.checked_mul(1024 * 1024)
        .with_context(|| format!("MAX_UPLOAD_MB={mb} is too large"))
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("'{other}' is not a boolean"),
    }
}
