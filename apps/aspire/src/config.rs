use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Which scorer ranks records. Parsed from `SCORING_BACKEND`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringBackendKind {
    Hybrid,
    Keyword,
}

impl FromStr for ScoringBackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hybrid" => Ok(Self::Hybrid),
            "keyword" => Ok(Self::Keyword),
            other => bail!("SCORING_BACKEND must be 'hybrid' or 'keyword', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub embedding_model: String,
    pub embedding_dimensions: usize,
    pub jobs_path: PathBuf,
    pub courses_path: PathBuf,
    pub jobs_top_k: usize,
    pub courses_top_k: usize,
    pub scoring_backend: ScoringBackendKind,
    pub keyword_weights_path: Option<PathBuf>,
    pub allowed_origins: Vec<String>,
    pub http_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            embedding_model: env_or("EMBEDDING_MODEL", "text-embedding-3-small"),
            embedding_dimensions: parse_env("EMBEDDING_DIMENSIONS", 64)?,
            jobs_path: env_or("JOBS_PATH", "./dataset/emb_jobs.json").into(),
            courses_path: env_or("COURSES_PATH", "./dataset/emb_courses.json").into(),
            jobs_top_k: parse_env("JOBS_TOP_K", 10)?,
            courses_top_k: parse_env("COURSES_TOP_K", 10)?,
            scoring_backend: env_or("SCORING_BACKEND", "hybrid").parse()?,
            keyword_weights_path: std::env::var("KEYWORD_WEIGHTS_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            allowed_origins: parse_origins(&env_or(
                "ALLOWED_ORIGINS",
                "http://127.0.0.1:5500,http://localhost:5500",
            )),
            http_timeout: Duration::from_secs(parse_env("HTTP_TIMEOUT_SECS", 120)?),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Comma-separated list; blank entries are dropped.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
