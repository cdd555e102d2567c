//! Query embedding provider — turns free text into a dense vector comparable
//! with the precomputed dataset embeddings.

use async_trait::async_trait;
use thiserror::Error;

pub mod openai;

pub use openai::OpenAiEmbedder;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Embedding API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Embedding API returned no vectors")]
    Empty,

    #[error("Embedding has dimension {found}, expected {expected}")]
    DimensionMismatch { expected: usize, found: usize },
}

/// External embedding collaborator. The returned vector must have the
/// dimensionality of the dataset embeddings.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}
