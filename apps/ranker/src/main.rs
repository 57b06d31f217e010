mod config;
mod errors;
mod extraction;
mod llm_client;
mod ranking;
mod routes;
mod scoring;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::{PdfTextExtractor, TesseractOcr};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::scoring::{ResumeScorer, ResponseFormat, ScorerConfig};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Ranker v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the Completion Service
    let structured = config.response_format == ResponseFormat::Structured;
    let llm = LlmClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        structured,
    )
    .context("Failed to build HTTP client for the completion service")?;
    info!(
        "LLM client initialized (model: {}, structured output: {structured})",
        llm.model()
    );

    let scorer = ResumeScorer::new(
        Arc::new(llm),
        ScorerConfig {
            response_format: config.response_format,
        },
    );

    if !TesseractOcr::is_available() {
        warn!("OCR tools not found; scanned resumes will be skipped");
    }

    let state = AppState {
        config: config.clone(),
        scorer,
        extractor: Arc::new(PdfTextExtractor::new()),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");
    info!("Results are exported to {}", config.export_path.display());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
