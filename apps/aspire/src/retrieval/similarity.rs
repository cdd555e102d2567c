//! Similarity Scorer — cosine similarity against every row, then per-query
//! max-normalization into [0, 1].
//!
//! The dense branch always divides by the maximum. The lexical branch skips
//! the division when the maximum is below `LEXICAL_NORMALIZATION_FLOOR`, so a
//! faint overlap is not stretched into a top score.

use thiserror::Error;
use tracing::debug;

use crate::retrieval::lexical::{LexicalIndex, SparseVector};
use crate::retrieval::store::{l2_norm, EmbeddingMatrix};

/// Lexical maxima below this value are left unnormalized.
pub const LEXICAL_NORMALIZATION_FLOOR: f64 = 0.01;

#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    #[error("Query embedding has dimension {found}, collection expects {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Score vector has {found} entries for {expected} records")]
    LengthMismatch { expected: usize, found: usize },
}

/// How a raw similarity vector is scaled by its maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalization {
    Always,
    /// Divide only when the maximum is at least the given floor.
    AboveFloor(f64),
}

/// Raw cosine similarity between `query` and every matrix row.
pub fn dense_similarities(
    query: &[f32],
    matrix: &EmbeddingMatrix,
) -> Result<Vec<f64>, ScoringError> {
    if matrix.rows() == 0 {
        return Ok(Vec::new());
    }
    if query.len() != matrix.dim() {
        return Err(ScoringError::DimensionMismatch {
            expected: matrix.dim(),
            found: query.len(),
        });
    }

    let query_norm = l2_norm(query);
    Ok((0..matrix.rows())
        .map(|i| {
            let denom = query_norm * matrix.norm(i);
            if denom == 0.0 {
                return 0.0;
            }
            let dot: f64 = query
                .iter()
                .zip(matrix.row(i))
                .map(|(a, b)| f64::from(*a) * f64::from(*b))
                .sum();
            dot / denom
        })
        .collect())
}

/// Raw cosine similarity between a projected query and every index row.
pub fn lexical_similarities(query: &SparseVector, index: &LexicalIndex) -> Vec<f64> {
    let query_norm = query.norm();
    index
        .rows()
        .iter()
        .map(|row| {
            let denom = query_norm * row.norm();
            if denom == 0.0 {
                0.0
            } else {
                query.dot(row) / denom
            }
        })
        .collect()
}

/// Scales `scores` into [0, 1].
///
/// Negative and non-finite values become 0 first. A vector whose maximum is
/// not positive comes back as all zeros.
pub fn normalize(scores: Vec<f64>, mode: Normalization) -> Vec<f64> {
    let scores: Vec<f64> = scores
        .into_iter()
        .map(|s| if s.is_finite() { s.max(0.0) } else { 0.0 })
        .collect();

    let max = scores.iter().copied().fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return vec![0.0; scores.len()];
    }

    let divide = match mode {
        Normalization::Always => true,
        Normalization::AboveFloor(floor) => max >= floor,
    };

    if divide {
        scores.into_iter().map(|s| (s / max).min(1.0)).collect()
    } else {
        scores.into_iter().map(|s| s.min(1.0)).collect()
    }
}

/// Normalized dense similarity vector S_d.
pub fn score_dense(query: &[f32], matrix: &EmbeddingMatrix) -> Result<Vec<f64>, ScoringError> {
    Ok(normalize(
        dense_similarities(query, matrix)?,
        Normalization::Always,
    ))
}

/// Normalized lexical similarity vector S_l.
pub fn score_lexical(query_text: &str, index: &LexicalIndex) -> Vec<f64> {
    if index.is_empty() {
        return Vec::new();
    }
    let query = index.query(query_text);
    if query.is_zero() {
        debug!("Query shares no terms with the lexical index");
        return vec![0.0; index.len()];
    }
    debug!("Lexical query matched {} index terms", query.nnz());
    normalize(
        lexical_similarities(&query, index),
        Normalization::AboveFloor(LEXICAL_NORMALIZATION_FLOOR),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Job;
    use crate::retrieval::store::{RecordCollection, SourceRecord};

    fn matrix(rows: Vec<Vec<f32>>) -> EmbeddingMatrix {
        let sources = rows
            .into_iter()
            .enumerate()
            .map(|(i, emb)| SourceRecord {
                key: format!("request-{i:05}"),
                fields: Job::default(),
                embedding: Some(emb),
            })
            .collect();
        RecordCollection::load(sources)
            .unwrap()
            .embedding_matrix()
            .clone()
    }

    #[test]
    fn test_dense_cosine_values() {
        let m = matrix(vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]]);
        let sims = dense_similarities(&[1.0, 0.0], &m).unwrap();
        assert!((sims[0] - 1.0).abs() < 1e-9);
        assert!(sims[1].abs() < 1e-9);
        assert!((sims[2] - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn test_dense_dimension_mismatch_is_error() {
        let m = matrix(vec![vec![1.0, 0.0]]);
        let err = dense_similarities(&[1.0, 0.0, 0.0], &m).unwrap_err();
        assert_eq!(
            err,
            ScoringError::DimensionMismatch {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_zero_query_scores_all_zero() {
        let m = matrix(vec![vec![1.0, 0.0], vec![0.5, 0.5]]);
        let scores = score_dense(&[0.0, 0.0], &m).unwrap();
        assert_eq!(scores, vec![0.0, 0.0]);
    }

    #[test]
    fn test_dense_normalization_is_unconditional() {
        // Max raw similarity is tiny but still scaled up to 1.0
        let scores = normalize(vec![0.004, 0.002], Normalization::Always);
        assert!((scores[0] - 1.0).abs() < 1e-9);
        assert!((scores[1] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_lexical_below_floor_is_left_raw() {
        let scores = normalize(
            vec![0.005, 0.001, 0.0],
            Normalization::AboveFloor(LEXICAL_NORMALIZATION_FLOOR),
        );
        assert_eq!(scores, vec![0.005, 0.001, 0.0]);
    }

    #[test]
    fn test_lexical_at_floor_is_normalized() {
        let scores = normalize(
            vec![0.01, 0.005],
            Normalization::AboveFloor(LEXICAL_NORMALIZATION_FLOOR),
        );
        assert!((scores[0] - 1.0).abs() < 1e-9);
        assert!((scores[1] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_all_zero_normalizes_without_nan() {
        for mode in [
            Normalization::Always,
            Normalization::AboveFloor(LEXICAL_NORMALIZATION_FLOOR),
        ] {
            let scores = normalize(vec![0.0, 0.0, 0.0], mode);
            assert_eq!(scores, vec![0.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn test_normalized_scores_stay_in_unit_interval() {
        let scores = normalize(
            vec![-0.7, 0.3, f64::NAN, 0.9, f64::INFINITY, -0.1],
            Normalization::Always,
        );
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
        assert_eq!(scores[0], 0.0);
        assert!((scores[3] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_negative_normalizes_to_zero() {
        let scores = normalize(vec![-0.2, -0.9], Normalization::Always);
        assert_eq!(scores, vec![0.0, 0.0]);
    }

    #[test]
    fn test_score_lexical_prefers_keyword_match() {
        let index = LexicalIndex::from_documents(&[
            "frontend engineer react",
            "backend engineer rust",
            "data analyst sql",
        ]);
        let scores = score_lexical("rust backend", &index);
        assert!((scores[1] - 1.0).abs() < 1e-9);
        assert_eq!(scores[2], 0.0);
        assert!(scores[0] < scores[1]);
    }

    #[test]
    fn test_empty_matrix_scores_empty() {
        let m = matrix(vec![]);
        assert!(score_dense(&[1.0, 2.0], &m).unwrap().is_empty());
    }

    #[test]
    fn test_empty_lexical_index_scores_empty() {
        let index = LexicalIndex::from_documents::<&str>(&[]);
        assert!(score_lexical("rust", &index).is_empty());
    }
}
