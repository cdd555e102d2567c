//! Lexical Index — smoothed TF-IDF term weights over a per-collection text projection.
//!
//! The vocabulary is fixed at build time. Queries are projected into that
//! vocabulary and any term the corpus never contained carries zero weight.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::retrieval::store::RecordCollection;

/// Unicode word runs of at least two word characters.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"));

/// Lowercases `text` and splits it into index tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Sparse vector over term ids, kept sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_unsorted(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|(term, _)| *term);
        Self { entries }
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|(_, w)| *w == 0.0)
    }

    pub fn contains(&self, term: usize) -> bool {
        self.weight(term) != 0.0
    }

    pub fn weight(&self, term: usize) -> f64 {
        self.entries
            .binary_search_by_key(&term, |(t, _)| *t)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_term, a_w) = self.entries[i];
            let (b_term, b_w) = other.entries[j];
            match a_term.cmp(&b_term) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn l2_normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
        self
    }
}

/// TF-IDF term-weight matrix with one row per record.
#[derive(Debug, Clone, Default)]
pub struct LexicalIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    rows: Vec<SparseVector>,
}

impl LexicalIndex {
    /// Builds the index from `projection(record)` for every record, in collection order.
    pub fn build<T, F>(collection: &RecordCollection<T>, projection: F) -> Self
    where
        F: Fn(&T) -> String,
    {
        let documents: Vec<String> = collection
            .records()
            .iter()
            .map(|r| projection(&r.fields))
            .collect();
        Self::from_documents(&documents)
    }

    pub fn from_documents<S: AsRef<str>>(documents: &[S]) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<usize> = Vec::new();
        let mut counts_per_doc: Vec<HashMap<usize, u32>> = Vec::with_capacity(documents.len());

        for doc in documents {
            let mut counts: HashMap<usize, u32> = HashMap::new();
            for token in tokenize(doc.as_ref()) {
                let next_id = vocabulary.len();
                let id = *vocabulary.entry(token).or_insert(next_id);
                if id == doc_freq.len() {
                    doc_freq.push(0);
                }
                *counts.entry(id).or_insert(0) += 1;
            }
            for id in counts.keys() {
                doc_freq[*id] += 1;
            }
            counts_per_doc.push(counts);
        }

        // Smoothed idf: ln((1 + n) / (1 + df)) + 1
        let n = documents.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|df| ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();

        let rows = counts_per_doc
            .into_iter()
            .map(|counts| weigh(counts, &idf))
            .collect();

        Self {
            vocabulary,
            idf,
            rows,
        }
    }

    /// Projects free text into the build-time term space.
    pub fn query(&self, text: &str) -> SparseVector {
        let mut counts: HashMap<usize, u32> = HashMap::new();
        for token in tokenize(text) {
            if let Some(id) = self.vocabulary.get(&token) {
                *counts.entry(*id).or_insert(0) += 1;
            }
        }
        weigh(counts, &self.idf)
    }

    pub fn term_id(&self, token: &str) -> Option<usize> {
        self.vocabulary.get(token).copied()
    }

    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

fn weigh(counts: HashMap<usize, u32>, idf: &[f64]) -> SparseVector {
    SparseVector::from_unsorted(
        counts
            .into_iter()
            .map(|(id, tf)| (id, f64::from(tf) * idf[id]))
            .collect(),
    )
    .l2_normalized()
}
