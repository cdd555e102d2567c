//! Scoring backends — produce one score in [0, 1] per record for a query.
//!
//! Default: `Hybrid` (dense embedding cosine blended with lexical TF-IDF cosine).
//! Alternative: `Keyword` (lexical weight-table heuristic, no embedding signal).
//!
//! Selected at startup via `SCORING_BACKEND`; the ranking pipeline is shared.

use crate::retrieval::corpus::Corpus;
use crate::retrieval::keyword::KeywordScorer;
use crate::retrieval::similarity::{score_dense, score_lexical, ScoringError};

/// Weight of the dense signal in the hybrid blend. The lexical signal gets the rest.
pub const DENSE_WEIGHT: f64 = 0.8;

/// One query as seen by the scorers.
#[derive(Debug, Clone, Copy)]
pub struct RankingQuery<'a> {
    pub text: &'a str,
    pub embedding: &'a [f32],
}

// ────────────────────────────────────────────────────────────────────────────
// Hybrid scorer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct HybridScorer {
    alpha: f64,
}

impl Default for HybridScorer {
    fn default() -> Self {
        Self {
            alpha: DENSE_WEIGHT,
        }
    }
}

impl HybridScorer {
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn score<T>(
        &self,
        query: &RankingQuery<'_>,
        corpus: &Corpus<T>,
    ) -> Result<Vec<f64>, ScoringError> {
        let dense = score_dense(query.embedding, corpus.collection().embedding_matrix())?;
        let lexical = score_lexical(query.text, corpus.lexical_index());
        blend(&dense, &lexical, self.alpha)
    }
}

/// `alpha * dense[i] + (1 - alpha) * lexical[i]`
pub fn blend(dense: &[f64], lexical: &[f64], alpha: f64) -> Result<Vec<f64>, ScoringError> {
    if dense.len() != lexical.len() {
        return Err(ScoringError::LengthMismatch {
            expected: dense.len(),
            found: lexical.len(),
        });
    }
    Ok(dense
        .iter()
        .zip(lexical)
        .map(|(d, l)| alpha * d + (1.0 - alpha) * l)
        .collect())
}

// ────────────────────────────────────────────────────────────────────────────
// Backend selection
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum ScoringBackend {
    Hybrid(HybridScorer),
    Keyword(KeywordScorer),
}

impl Default for ScoringBackend {
    fn default() -> Self {
        Self::Hybrid(HybridScorer::default())
    }
}

impl ScoringBackend {
    /// "hybrid" | "keyword", used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hybrid(_) => "hybrid",
            Self::Keyword(_) => "keyword",
        }
    }

    pub fn score<T>(
        &self,
        query: &RankingQuery<'_>,
        corpus: &Corpus<T>,
    ) -> Result<Vec<f64>, ScoringError> {
        match self {
            Self::Hybrid(scorer) => scorer.score(query, corpus),
            Self::Keyword(scorer) => Ok(scorer.score(query.text, corpus.lexical_index())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieval::corpus::test_support::{corpus_of, job};

    #[test]
    fn test_default_alpha_is_dense_weight() {
        assert_eq!(HybridScorer::default().alpha(), 0.8);
    }

    #[test]
    fn test_blend_weights_dense_and_lexical() {
        let blended = blend(&[1.0, 0.0, 0.5], &[0.0, 1.0, 0.5], DENSE_WEIGHT).unwrap();
        assert!((blended[0] - 0.8).abs() < 1e-9);
        assert!((blended[1] - 0.2).abs() < 1e-9);
        assert!((blended[2] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_blend_is_monotonic_in_each_signal() {
        let steps = [0.0, 0.25, 0.5, 0.75, 1.0];
        for fixed in steps {
            for pair in steps.windows(2) {
                let (lo, hi) = (pair[0], pair[1]);
                let d_lo = blend(&[lo], &[fixed], DENSE_WEIGHT).unwrap()[0];
                let d_hi = blend(&[hi], &[fixed], DENSE_WEIGHT).unwrap()[0];
                assert!(d_hi > d_lo);
                let l_lo = blend(&[fixed], &[lo], DENSE_WEIGHT).unwrap()[0];
                let l_hi = blend(&[fixed], &[hi], DENSE_WEIGHT).unwrap()[0];
                assert!(l_hi > l_lo);
            }
        }
    }

    #[test]
    fn test_blend_length_mismatch_is_error() {
        assert!(blend(&[1.0], &[1.0, 0.5], DENSE_WEIGHT).is_err());
    }

    #[test]
    fn test_hybrid_scores_stay_in_unit_interval() {
        let corpus = corpus_of(vec![
            (job("Backend Engineer", "Rust"), vec![1.0, 0.0]),
            (job("Frontend Engineer", "React"), vec![-1.0, 0.2]),
            (job("Data Analyst", "SQL"), vec![0.3, 0.9]),
        ]);
        let query = RankingQuery {
            text: "rust engineer",
            embedding: &[0.9, 0.1],
        };
        let scores = ScoringBackend::default().score(&query, &corpus).unwrap();
        assert_eq!(scores.len(), 3);
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
        assert!(scores[0] > scores[1] && scores[0] > scores[2]);
    }

    #[test]
    fn test_hybrid_rejects_wrong_dimension() {
        let corpus = corpus_of(vec![(job("QA", "Selenium"), vec![1.0, 0.0])]);
        let query = RankingQuery {
            text: "qa",
            embedding: &[1.0, 0.0, 0.0],
        };
        assert!(ScoringBackend::default().score(&query, &corpus).is_err());
    }

    #[test]
    fn test_keyword_backend_ignores_embedding() {
        let corpus = corpus_of(vec![
            (job("Backend Engineer", "Rust"), vec![0.0, 1.0]),
            (job("Data Analyst", "SQL"), vec![1.0, 0.0]),
        ]);
        let query = RankingQuery {
            text: "sql",
            embedding: &[0.0, 1.0, 5.0],
        };
        let backend = ScoringBackend::Keyword(KeywordScorer::default());
        assert_eq!(backend.name(), "keyword");
        assert_eq!(backend.score(&query, &corpus).unwrap(), vec![0.0, 1.0]);
    }
}
