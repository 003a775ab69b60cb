//! Okapi BM25 with query term frequency saturation

use super::RankingFunction;
use crate::error::{EvalError, Result};
use crate::score::ScoreData;
use rankeval_config::Bm25Config;

/// Okapi BM25 ranking function
///
/// ```text
/// idf = ln((N - df + 0.5) / (df + 0.5) + 1)
/// tf  = tf * (k1 + 1) / (tf + k1 * (1 - b + b * doc_size / avg_dl))
/// qtf = (k3 + 1) * qtw / (k3 + qtw)
/// ```
///
/// The `+ 1` inside the idf logarithm keeps every term's weight positive, even
/// for terms occurring in more than half the collection.
#[derive(Debug, Clone)]
pub struct Bm25Ranker {
    k1: f64,
    b: f64,
    k3: f64,
}

impl Bm25Ranker {
    pub const DEFAULT_K1: f64 = 1.2;
    pub const DEFAULT_B: f64 = 0.75;
    pub const DEFAULT_K3: f64 = 500.0;

    pub fn new(k1: f64, b: f64, k3: f64) -> Result<Self> {
        if !k1.is_finite() || k1 <= 0.0 {
            return Err(EvalError::invalid_configuration(
                "bm25.k1",
                format!("must be > 0, got {}", k1),
            ));
        }
        if !(0.0..=1.0).contains(&b) {
            return Err(EvalError::invalid_configuration(
                "bm25.b",
                format!("must be in [0, 1], got {}", b),
            ));
        }
        if !k3.is_finite() || k3 < 0.0 {
            return Err(EvalError::invalid_configuration(
                "bm25.k3",
                format!("must be >= 0, got {}", k3),
            ));
        }
        Ok(Self { k1, b, k3 })
    }

    pub fn from_config(config: &Bm25Config) -> Result<Self> {
        Self::new(config.k1, config.b, config.k3)
    }

    fn idf(&self, sd: &ScoreData) -> f64 {
        let n = sd.num_docs as f64;
        let df = sd.doc_count as f64;
        ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
    }
}

impl Default for Bm25Ranker {
    fn default() -> Self {
        Self {
            k1: Self::DEFAULT_K1,
            b: Self::DEFAULT_B,
            k3: Self::DEFAULT_K3,
        }
    }
}

impl RankingFunction for Bm25Ranker {
    fn name(&self) -> &str {
        "bm25"
    }

    fn score_term(&self, sd: &ScoreData) -> f64 {
        if sd.doc_term_count == 0.0 || sd.query_term_weight == 0.0 {
            return 0.0;
        }

        let length_norm = 1.0 - self.b + self.b * sd.doc_size / sd.avg_dl;
        let tf = (sd.doc_term_count * (self.k1 + 1.0)) / (sd.doc_term_count + self.k1 * length_norm);
        let qtf = ((self.k3 + 1.0) * sd.query_term_weight) / (self.k3 + sd.query_term_weight);

        self.idf(sd) * tf * qtf
    }
}
