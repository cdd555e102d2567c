mod advice;
mod config;
mod embedding;
mod errors;
mod llm_client;
mod models;
mod retrieval;
mod routes;
mod state;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::advice::{AdviceOrchestrator, RetrievalLimits};
use crate::config::{Config, ScoringBackendKind};
use crate::embedding::OpenAiEmbedder;
use crate::llm_client::LlmClient;
use crate::models::{Course, Job};
use crate::retrieval::keyword::KeywordScorer;
use crate::retrieval::scorer::HybridScorer;
use crate::retrieval::{Corpus, ScoringBackend};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Aspire API v{}", env!("CARGO_PKG_VERSION"));

    // Load both collections; any malformed record aborts startup
    let jobs = Corpus::<Job>::from_json_file(&config.jobs_path)
        .with_context(|| format!("Failed to load jobs from {}", config.jobs_path.display()))?;
    let courses = Corpus::<Course>::from_json_file(&config.courses_path).with_context(|| {
        format!(
            "Failed to load courses from {}",
            config.courses_path.display()
        )
    })?;
    info!(
        "Loaded {} jobs and {} courses",
        jobs.size(),
        courses.size()
    );

    let scoring = build_scoring_backend(&config)?;
    match &scoring {
        ScoringBackend::Hybrid(hybrid) => info!(
            "Scoring backend: hybrid (dense weight {})",
            hybrid.alpha()
        ),
        ScoringBackend::Keyword(_) => info!("Scoring backend: keyword"),
    }

    // Initialize provider clients
    let embedder = OpenAiEmbedder::new(
        config.openai_api_key.clone(),
        &config.openai_base_url,
        config.embedding_model.clone(),
        config.embedding_dimensions,
        config.http_timeout,
    )?;
    info!(
        "Embedding client initialized (model: {}, dimensions: {})",
        config.embedding_model,
        embedder.dimensions()
    );

    // Every query vector is scored against both collections
    jobs.ensure_query_dim(embedder.dimensions())
        .context("Jobs dataset does not match EMBEDDING_DIMENSIONS")?;
    courses
        .ensure_query_dim(embedder.dimensions())
        .context("Courses dataset does not match EMBEDDING_DIMENSIONS")?;

    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        &config.openai_base_url,
        config.http_timeout,
    )?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let advisor = AdviceOrchestrator::new(
        jobs,
        courses,
        Arc::new(embedder),
        Arc::new(llm),
        scoring,
        RetrievalLimits {
            jobs_top_k: config.jobs_top_k,
            courses_top_k: config.courses_top_k,
        },
    );

    // Build app state
    let state = AppState {
        advisor: Arc::new(advisor),
    };

    // Build router
    let app = build_router(state, &config.allowed_origins);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Hybrid by default; keyword uses the optional weight table (every term weighs 1.0 without one).
fn build_scoring_backend(config: &Config) -> Result<ScoringBackend> {
    Ok(match config.scoring_backend {
        ScoringBackendKind::Hybrid => ScoringBackend::Hybrid(HybridScorer::default()),
        ScoringBackendKind::Keyword => {
            let scorer = match &config.keyword_weights_path {
                Some(path) => KeywordScorer::from_json_file(path)?,
                None => KeywordScorer::new(HashMap::new()),
            };
            ScoringBackend::Keyword(scorer)
        }
    })
}
