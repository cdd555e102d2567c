//! Hybrid Ranker — selects the top unique records for a query.
//!
//! Algorithm:
//! 1. Score every record with the configured backend
//! 2. Partially select the best `top_k * over_fetch_factor` candidates and sort them
//!    by score descending (ties keep the earlier record first)
//! 3. Walk the candidates, keeping a record only if its dedupe key is new
//! 4. Stop at `top_k` kept records or at the end of the window, whichever comes first
//!
//! Ranking never fails: an empty collection or a scoring error yields an empty list.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::{debug, warn};

use crate::models::Document;
use crate::retrieval::corpus::Corpus;
use crate::retrieval::scorer::{RankingQuery, ScoringBackend};
use crate::retrieval::store::Record;

/// A record selected by the ranker, with its position in the collection and blended score.
#[derive(Debug, Clone)]
pub struct RankedRecord<'a, T> {
    pub record: &'a Record<T>,
    pub position: usize,
    pub score: f64,
}

pub fn rank<'a, T: Document>(
    backend: &ScoringBackend,
    query: &RankingQuery<'_>,
    corpus: &'a Corpus<T>,
    top_k: usize,
    over_fetch_factor: usize,
) -> Vec<RankedRecord<'a, T>> {
    if top_k == 0 || corpus.is_empty() {
        return Vec::new();
    }

    let scores = match backend.score(query, corpus) {
        Ok(scores) => scores,
        Err(e) => {
            warn!(
                "{} scoring failed over {} records, returning no results: {e}",
                backend.name(),
                corpus.size()
            );
            return Vec::new();
        }
    };

    let ranked = select_unique(
        corpus.collection().records(),
        &scores,
        top_k,
        over_fetch_factor,
    );
    for r in &ranked {
        debug!(
            position = r.position,
            score = r.score,
            "Selected {}",
            r.record.key
        );
    }
    ranked
}

/// Picks up to `top_k` records with distinct dedupe keys, best score first.
pub fn select_unique<'a, T: Document>(
    records: &'a [Record<T>],
    scores: &[f64],
    top_k: usize,
    over_fetch_factor: usize,
) -> Vec<RankedRecord<'a, T>> {
    if scores.len() != records.len() {
        warn!(
            "Got {} scores for {} records, returning no results",
            scores.len(),
            records.len()
        );
        return Vec::new();
    }
    if top_k == 0 || records.is_empty() {
        return Vec::new();
    }

    let by_score_desc =
        |a: &usize, b: &usize| -> Ordering { scores[*b].total_cmp(&scores[*a]).then(a.cmp(b)) };

    let mut order: Vec<usize> = (0..records.len()).collect();
    let window = top_k
        .saturating_mul(over_fetch_factor.max(1))
        .min(order.len());
    if window < order.len() {
        order.select_nth_unstable_by(window - 1, by_score_desc);
        order.truncate(window);
    }
    order.sort_unstable_by(by_score_desc);

    let mut seen: HashSet<&str> = HashSet::with_capacity(window);
    let mut selected = Vec::with_capacity(top_k);
    for i in order {
        if selected.len() >= top_k {
            break;
        }
        let record = &records[i];
        if seen.insert(record.fields.dedupe_key()) {
            selected.push(RankedRecord {
                record,
                position: i,
                score: scores[i],
            });
        }
    }

    if selected.len() < top_k {
        debug!(
            "Over-fetch window of {window} yielded {} unique records for top_k={top_k}",
            selected.len()
        );
    }
    selected
}
