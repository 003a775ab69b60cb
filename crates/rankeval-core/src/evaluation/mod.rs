//! Evaluation of ranked results against relevance judgments

pub mod metrics;
pub mod stats;

use crate::error::{EvalError, Result};
use crate::index::{Judgments, QueryId};
use crate::retriever::ScoredDoc;
use metrics::{average_precision_with, geometric_mean_average_precision, mean_average_precision};
use rankeval_config::ApNormalization;
use stats::{paired_ttest, TTestResult};
use tracing::warn;

/// Average precision of one ranker on one query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AveragePrecisionRecord {
    pub query_id: QueryId,
    pub average_precision: f64,
}

/// Scores ranked results against a judgment set
pub struct Evaluator<'a, J: Judgments + ?Sized> {
    judgments: &'a J,
    cutoff: usize,
    normalization: ApNormalization,
}

impl<'a, J: Judgments + ?Sized> Evaluator<'a, J> {
    pub fn new(judgments: &'a J, cutoff: usize, normalization: ApNormalization) -> Self {
        Self {
            judgments,
            cutoff,
            normalization,
        }
    }

    /// Average precision for `query_id`; unjudged queries score 0
    pub fn average_precision(
        &self,
        query_id: QueryId,
        ranked: &[ScoredDoc],
    ) -> AveragePrecisionRecord {
        if !self.judgments.has_query(query_id) {
            warn!(query_id, "no relevance judgments for query, scoring 0");
        }
        let relevant = self.judgments.relevant_docs(query_id);

        AveragePrecisionRecord {
            query_id,
            average_precision: average_precision_with(
                ranked,
                &relevant,
                self.cutoff,
                self.normalization,
            ),
        }
    }
}

/// Per-query average precision of one ranker, in query order
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRun {
    pub ranker: String,
    pub records: Vec<AveragePrecisionRecord>,
}

impl EvaluationRun {
    pub fn new(ranker: impl Into<String>, records: Vec<AveragePrecisionRecord>) -> Self {
        Self {
            ranker: ranker.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.average_precision).collect()
    }

    /// Mean average precision; fails on an empty run
    pub fn map(&self) -> Result<f64> {
        mean_average_precision(&self.values())
    }

    /// Geometric mean average precision; fails on an empty run
    pub fn gmap(&self) -> Result<f64> {
        geometric_mean_average_precision(&self.values())
    }

    /// Paired t-test of this run (A) against `other` (B)
    ///
    /// Record `i` of both runs must refer to the same query.
    pub fn compare(&self, other: &EvaluationRun) -> Result<TTestResult> {
        if self.len() != other.len() {
            return Err(EvalError::invalid_argument(
                "runs",
                format!(
                    "{} has {} queries but {} has {}",
                    self.ranker,
                    self.len(),
                    other.ranker,
                    other.len()
                ),
            ));
        }

        if let Some((position, (a, b))) = self
            .records
            .iter()
            .zip(&other.records)
            .enumerate()
            .find(|(_, (a, b))| a.query_id != b.query_id)
        {
            return Err(EvalError::invalid_argument(
                "runs",
                format!(
                    "runs are not paired at position {}: query {} vs query {}",
                    position, a.query_id, b.query_id
                ),
            ));
        }

        paired_ttest(&self.values(), &other.values())
    }
}
