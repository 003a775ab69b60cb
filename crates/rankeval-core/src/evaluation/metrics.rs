//! Per-query ranking quality metrics over binary relevance

use crate::error::{EvalError, Result};
use crate::index::DocId;
use crate::retriever::ScoredDoc;
use rankeval_config::ApNormalization;
use std::collections::HashSet;

/// Floor applied to zero scores before taking logs in gMAP
const GMAP_EPSILON: f64 = 1e-6;

/// Average precision at `cutoff`, normalized by the full relevant set
///
/// Sums precision at every rank (1-based, up to `cutoff`) holding a relevant
/// document and divides by the number of relevant documents for the query,
/// retrieved or not. Returns 0 when the query has no relevant documents.
pub fn average_precision(ranked: &[ScoredDoc], relevant: &HashSet<DocId>, cutoff: usize) -> f64 {
    average_precision_with(ranked, relevant, cutoff, ApNormalization::Full)
}

/// Average precision with an explicit denominator policy
pub fn average_precision_with(
    ranked: &[ScoredDoc],
    relevant: &HashSet<DocId>,
    cutoff: usize,
    normalization: ApNormalization,
) -> f64 {
    let denominator = match normalization {
        ApNormalization::Full => relevant.len(),
        ApNormalization::Truncated => relevant.len().min(cutoff),
    };
    if denominator == 0 {
        return 0.0;
    }

    let mut hits = 0usize;
    let mut precision_sum = 0.0;
    for (rank, doc) in ranked.iter().take(cutoff).enumerate() {
        if relevant.contains(&doc.doc_id) {
            hits += 1;
            precision_sum += hits as f64 / (rank + 1) as f64;
        }
    }

    precision_sum / denominator as f64
}

/// Arithmetic mean of per-query average precision
pub fn mean_average_precision(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(EvalError::invalid_argument(
            "average_precisions",
            "mean average precision of zero queries is undefined",
        ));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Geometric mean of per-query average precision
///
/// Zero scores are floored so one failed query does not zero the mean.
pub fn geometric_mean_average_precision(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(EvalError::invalid_argument(
            "average_precisions",
            "geometric mean of zero queries is undefined",
        ));
    }
    let log_sum: f64 = values.iter().map(|v| v.max(GMAP_EPSILON).ln()).sum();
    Ok((log_sum / values.len() as f64).exp())
}

/// Fraction of the top `k` that is relevant
pub fn precision_at_k(ranked: &[ScoredDoc], relevant: &HashSet<DocId>, k: usize) -> f64 {
    if k == 0 {
        return 0.0;
    }
    count_relevant(ranked, relevant, k) as f64 / k as f64
}

/// Fraction of the relevant set found in the top `k`
pub fn recall_at_k(ranked: &[ScoredDoc], relevant: &HashSet<DocId>, k: usize) -> f64 {
    if relevant.is_empty() {
        return 0.0;
    }
    count_relevant(ranked, relevant, k) as f64 / relevant.len() as f64
}

/// Inverse rank of the first relevant document, 0 if none is retrieved
pub fn reciprocal_rank(ranked: &[ScoredDoc], relevant: &HashSet<DocId>) -> f64 {
    ranked
        .iter()
        .position(|doc| relevant.contains(&doc.doc_id))
        .map(|pos| 1.0 / (pos + 1) as f64)
        .unwrap_or(0.0)
}

fn count_relevant(ranked: &[ScoredDoc], relevant: &HashSet<DocId>, k: usize) -> usize {
    ranked
        .iter()
        .take(k)
        .filter(|doc| relevant.contains(&doc.doc_id))
        .count()
}
