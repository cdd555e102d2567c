//! Keyword scorer — lexical-only alternative backend driven by a keyword weight table.
//!
//! Algorithm:
//! 1. Tokenize the query with the lexical index tokenizer and keep distinct tokens
//! 2. For each record, sum the table weight of every query token its projection contains
//!    (tokens absent from the table weigh `DEFAULT_KEYWORD_WEIGHT`)
//! 3. Normalize by the maximum with the all-zero guard

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};

use crate::retrieval::lexical::{tokenize, LexicalIndex};
use crate::retrieval::similarity::{normalize, Normalization};

pub const DEFAULT_KEYWORD_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone, Default)]
pub struct KeywordScorer {
    weights: HashMap<String, f64>,
}

impl KeywordScorer {
    pub fn new(weights: HashMap<String, f64>) -> Self {
        Self {
            weights: weights
                .into_iter()
                .map(|(k, w)| (k.to_lowercase(), w))
                .collect(),
        }
    }

    /// Loads a `{ "keyword": weight }` JSON table.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read keyword table {}", path.display()))?;
        let weights: HashMap<String, f64> = serde_json::from_str(&text).with_context(|| {
            format!(
                "Keyword table {} is not a JSON object of weights",
                path.display()
            )
        })?;
        Ok(Self::new(weights))
    }

    pub fn weight(&self, token: &str) -> f64 {
        self.weights
            .get(token)
            .copied()
            .unwrap_or(DEFAULT_KEYWORD_WEIGHT)
    }

    pub fn score(&self, query_text: &str, index: &LexicalIndex) -> Vec<f64> {
        let mut seen = HashSet::new();
        let terms: Vec<(usize, f64)> = tokenize(query_text)
            .into_iter()
            .filter(|token| seen.insert(token.clone()))
            .filter_map(|token| index.term_id(&token).map(|id| (id, self.weight(&token))))
            .collect();

        let raw: Vec<f64> = index
            .rows()
            .iter()
            .map(|row| {
                terms
                    .iter()
                    .filter(|(id, _)| row.contains(*id))
                    .map(|(_, w)| w)
                    .sum::<f64>()
            })
            .collect();

        normalize(raw, Normalization::Always)
    }
}
