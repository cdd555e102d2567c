//! Record Store — one immutable collection plus its dense embedding matrix.
//!
//! Source format is the JSON map written by the offline embedding jobs:
//! `{ "request-00000": { ...fields, "emb": [f32; D] }, ... }`. Key order in the
//! file is the canonical positional order used by every downstream matrix.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Malformed dataset JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Record '{key}' has no embedding")]
    MissingEmbedding { key: String },

    #[error("Record '{key}' has an empty embedding")]
    EmptyEmbedding { key: String },

    #[error("Record '{key}' has a non-finite embedding value")]
    NonFiniteEmbedding { key: String },

    #[error("Record '{key}' has embedding dimension {found}, expected {expected}")]
    DimensionMismatch {
        key: String,
        expected: usize,
        found: usize,
    },

    #[error("Dataset embeddings have dimension {found}, query embeddings have {expected}")]
    QueryDimensionMismatch { expected: usize, found: usize },
}

/// A record as supplied by a loader, before validation.
#[derive(Debug, Clone)]
pub struct SourceRecord<T> {
    pub key: String,
    pub fields: T,
    pub embedding: Option<Vec<f32>>,
}

#[derive(Debug, Deserialize)]
struct RawRecord<T> {
    #[serde(flatten)]
    fields: T,
    #[serde(rename = "emb", default)]
    embedding: Option<Vec<f32>>,
}

/// A validated, keyed record. Its embedding lives in the collection's matrix
/// at the same position.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<T> {
    pub key: String,
    pub fields: T,
}

/// Row-major dense matrix with one row per record.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingMatrix {
    dim: usize,
    values: Vec<f32>,
    norms: Vec<f64>,
}

impl EmbeddingMatrix {
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn rows(&self) -> usize {
        self.norms.len()
    }

    pub fn row(&self, i: usize) -> &[f32] {
        &self.values[i * self.dim..(i + 1) * self.dim]
    }

    /// Precomputed L2 norm of row `i`.
    pub fn norm(&self, i: usize) -> f64 {
        self.norms[i]
    }

    fn push_row(&mut self, row: &[f32]) {
        self.norms.push(l2_norm(row));
        self.values.extend_from_slice(row);
    }
}

pub(crate) fn l2_norm(v: &[f32]) -> f64 {
    v.iter().map(|x| f64::from(*x) * f64::from(*x)).sum::<f64>().sqrt()
}

/// An ordered, immutable collection of records of one kind.
#[derive(Debug, Clone)]
pub struct RecordCollection<T> {
    records: Vec<Record<T>>,
    matrix: EmbeddingMatrix,
}

impl<T> RecordCollection<T> {
    /// Validates the source records and derives the dense matrix.
    ///
    /// The first record fixes the dimensionality; every other record must match it.
    pub fn load(sources: Vec<SourceRecord<T>>) -> Result<Self, DataLoadError> {
        let mut records = Vec::with_capacity(sources.len());
        let mut matrix = EmbeddingMatrix::default();

        for source in sources {
            let embedding = source
                .embedding
                .ok_or_else(|| DataLoadError::MissingEmbedding {
                    key: source.key.clone(),
                })?;

            if embedding.is_empty() {
                return Err(DataLoadError::EmptyEmbedding { key: source.key });
            }
            if embedding.iter().any(|v| !v.is_finite()) {
                return Err(DataLoadError::NonFiniteEmbedding { key: source.key });
            }

            if records.is_empty() {
                matrix.dim = embedding.len();
            } else if embedding.len() != matrix.dim {
                return Err(DataLoadError::DimensionMismatch {
                    key: source.key,
                    expected: matrix.dim,
                    found: embedding.len(),
                });
            }

            matrix.push_row(&embedding);
            records.push(Record {
                key: source.key,
                fields: source.fields,
            });
        }

        Ok(Self { records, matrix })
    }

    pub fn size(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn embedding_matrix(&self) -> &EmbeddingMatrix {
        &self.matrix
    }

    #[allow(dead_code)]
    pub fn record_at(&self, i: usize) -> Option<&Record<T>> {
        self.records.get(i)
    }

    pub fn records(&self) -> &[Record<T>] {
        &self.records
    }

    #[allow(dead_code)]
    pub fn keys_in_order(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.key.as_str())
    }
}

impl<T: DeserializeOwned> RecordCollection<T> {
    /// Parses the embedded-dataset JSON map, preserving key order.
    pub fn from_json_str(text: &str) -> Result<Self, DataLoadError> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)?;

        let mut sources = Vec::with_capacity(map.len());
        for (key, value) in map {
            let raw: RawRecord<T> = serde_json::from_value(value)?;
            sources.push(SourceRecord {
                key,
                fields: raw.fields,
                embedding: raw.embedding,
            });
        }

        Self::load(sources)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let collection = Self::from_json_str(&text)?;
        info!(
            "Loaded {} records (dim {}) from {}",
            collection.size(),
            collection.matrix.dim(),
            path.display()
        );
        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::models::{Course, Job};

    fn source(key: &str, embedding: Option<Vec<f32>>) -> SourceRecord<Job> {
        SourceRecord {
            key: key.to_string(),
            fields: Job::default(),
            embedding,
        }
    }

    #[test]
    fn test_load_builds_matrix_in_order() {
        let collection = RecordCollection::load(vec![
            source("request-00000", Some(vec![1.0, 0.0])),
            source("request-00001", Some(vec![3.0, 4.0])),
        ])
        .unwrap();

        assert_eq!(collection.size(), 2);
        assert_eq!(collection.embedding_matrix().dim(), 2);
        assert_eq!(collection.embedding_matrix().row(1), &[3.0, 4.0]);
        assert!((collection.embedding_matrix().norm(1) - 5.0).abs() < 1e-9);
        assert_eq!(
            collection.keys_in_order().collect::<Vec<_>>(),
            vec!["request-00000", "request-00001"]
        );
        assert_eq!(collection.record_at(0).unwrap().key, "request-00000");
        assert!(collection.record_at(2).is_none());
    }

    #[test]
    fn test_load_rejects_missing_embedding() {
        let err = RecordCollection::load(vec![
            source("a", Some(vec![1.0])),
            source("b", None),
        ])
        .unwrap_err();
        assert!(matches!(err, DataLoadError::MissingEmbedding { key } if key == "b"));
    }

    #[test]
    fn test_load_rejects_dimension_mismatch() {
        let err = RecordCollection::load(vec![
            source("a", Some(vec![1.0, 2.0])),
            source("b", Some(vec![1.0, 2.0, 3.0])),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::DimensionMismatch { expected: 2, found: 3, .. }
        ));
    }

    #[test]
    fn test_load_rejects_empty_and_non_finite_embeddings() {
        let err = RecordCollection::load(vec![source("a", Some(vec![]))]).unwrap_err();
        assert!(matches!(err, DataLoadError::EmptyEmbedding { .. }));

        let err = RecordCollection::load(vec![source("a", Some(vec![f32::NAN]))]).unwrap_err();
        assert!(matches!(err, DataLoadError::NonFiniteEmbedding { .. }));
    }

    #[test]
    fn test_empty_source_loads_empty_collection() {
        let collection = RecordCollection::<Job>::load(vec![]).unwrap();
        assert!(collection.is_empty());
        assert_eq!(collection.embedding_matrix().rows(), 0);
    }

    #[test]
    fn test_from_json_str_preserves_file_order() {
        let json = r#"{
            "request-00002": {"name": "Operating Systems", "emb": [0.1, 0.2]},
            "request-00000": {"name": "Compilers", "nameEn": null, "emb": [0.3, 0.4]}
        }"#;
        let collection = RecordCollection::<Course>::from_json_str(json).unwrap();
        assert_eq!(
            collection.keys_in_order().collect::<Vec<_>>(),
            vec!["request-00002", "request-00000"]
        );
        assert_eq!(
            collection.record_at(1).unwrap().fields.name.as_deref(),
            Some("Compilers")
        );
    }

    #[test]
    fn test_from_json_str_requires_emb_field() {
        let json = r#"{"request-00000": {"職位": "QA"}}"#;
        let err = RecordCollection::<Job>::from_json_str(json).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingEmbedding { .. }));
    }

    #[test]
    fn test_from_json_str_rejects_non_object() {
        let err = RecordCollection::<Job>::from_json_str("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, DataLoadError::Parse(_)));
    }

    #[test]
    fn test_from_json_file_reads_dataset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"request-00000": {{"職位": "韌體工程師", "emb": [0.5, 0.5, 0.5]}}}}"#
        )
        .unwrap();

        let collection = RecordCollection::<Job>::from_json_file(file.path()).unwrap();
        assert_eq!(collection.size(), 1);
        assert_eq!(collection.embedding_matrix().dim(), 3);
    }

    #[test]
    fn test_from_json_file_missing_path_is_io_error() {
        let err = RecordCollection::<Job>::from_json_file("/nonexistent/emb_jobs.json")
            .unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
    }
}
