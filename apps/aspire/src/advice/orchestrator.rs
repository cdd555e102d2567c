//! Advice Orchestrator — answers one career question end to end.
//!
//! Flow: embed query → rank jobs → rank courses → format summaries →
//!       fill system prompt → generate advice.
//!
//! Embedding failures abort the request. Generation failures do not: the two
//! summaries are still returned so the caller can show partial results.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::advice::formatter::{format_summary, SummaryFormat};
use crate::advice::prompts::{system_prompt, user_turn};
use crate::embedding::{EmbeddingError, EmbeddingProvider};
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::{Course, Document, Job};
use crate::retrieval::{rank, Corpus, RankingQuery, ScoringBackend};

pub const DEFAULT_JOBS_TOP_K: usize = 10;
pub const DEFAULT_COURSES_TOP_K: usize = 10;

#[derive(Debug, Error)]
pub enum AdviceError {
    #[error("Query cannot be empty")]
    EmptyQuery,

    #[error("Embedding service error: {0}")]
    EmbeddingService(#[from] EmbeddingError),
}

/// Generation failed after retrieval succeeded.
#[derive(Debug, Error)]
#[error("Advice generation failed: {0}")]
pub struct AdviceGenerationError(#[from] pub LlmError);

/// Summary sizes for one query.
#[derive(Debug, Clone, Copy)]
pub struct RetrievalLimits {
    pub jobs_top_k: usize,
    pub courses_top_k: usize,
}

impl Default for RetrievalLimits {
    fn default() -> Self {
        Self {
            jobs_top_k: DEFAULT_JOBS_TOP_K,
            courses_top_k: DEFAULT_COURSES_TOP_K,
        }
    }
}

/// Result of one advice query. Summaries are always present once the query
/// was embedded; the advice may have failed independently.
#[derive(Debug)]
pub struct CareerAdvice {
    pub jobs_summary: String,
    pub courses_summary: String,
    pub advice: Result<String, AdviceGenerationError>,
}

/// Built once at startup and shared read-only across requests.
pub struct AdviceOrchestrator {
    jobs: Corpus<Job>,
    courses: Corpus<Course>,
    embedder: Arc<dyn EmbeddingProvider>,
    generator: Arc<dyn TextGenerator>,
    scoring: ScoringBackend,
    limits: RetrievalLimits,
}

impl AdviceOrchestrator {
    pub fn new(
        jobs: Corpus<Job>,
        courses: Corpus<Course>,
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn TextGenerator>,
        scoring: ScoringBackend,
        limits: RetrievalLimits,
    ) -> Self {
        Self {
            jobs,
            courses,
            embedder,
            generator,
            scoring,
            limits,
        }
    }

    pub fn jobs_count(&self) -> usize {
        self.jobs.size()
    }

    pub fn courses_count(&self) -> usize {
        self.courses.size()
    }

    pub async fn query(&self, text: &str) -> Result<CareerAdvice, AdviceError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AdviceError::EmptyQuery);
        }

        let embedding = self.embedder.embed(text).await?;
        let query = RankingQuery {
            text,
            embedding: &embedding,
        };

        let jobs_summary = self.summarize(&self.jobs, &query, self.limits.jobs_top_k);
        let courses_summary = self.summarize(&self.courses, &query, self.limits.courses_top_k);

        let system = system_prompt(text, &jobs_summary, &courses_summary);
        let advice = self
            .generator
            .generate(&system, &user_turn(text))
            .await
            .map_err(AdviceGenerationError::from);

        match &advice {
            Ok(a) => info!("Advice generated ({} chars)", a.chars().count()),
            Err(e) => warn!("{e}; returning retrieval results only"),
        }

        Ok(CareerAdvice {
            jobs_summary,
            courses_summary,
            advice,
        })
    }

    fn summarize<T: Document + SummaryFormat>(
        &self,
        corpus: &Corpus<T>,
        query: &RankingQuery<'_>,
        top_k: usize,
    ) -> String {
        let ranked = rank(&self.scoring, query, corpus, top_k, T::OVER_FETCH_FACTOR);
        info!(
            "Ranked {} of {} records with {} scoring (top_k={top_k})",
            ranked.len(),
            corpus.size(),
            self.scoring.name()
        );
        let fields: Vec<&T> = ranked.iter().map(|r| &r.record.fields).collect();
        format_summary(&fields)
    }
}
