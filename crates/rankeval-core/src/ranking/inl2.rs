//! InL2: inverse document frequency with Laplace after-effect and
//! term frequency normalization 2, from the divergence-from-randomness family

use super::RankingFunction;
use crate::error::{EvalError, Result};
use crate::score::ScoreData;
use rankeval_config::InL2Config;

/// InL2 ranking function
///
/// ```text
/// tfn   = tf * log2(1 + avg_dl / doc_size)
/// score = qtw * tfn / (tfn + c) * log2((N + 1) / (corpus_term_count + 0.5))
/// ```
#[derive(Debug, Clone)]
pub struct InL2Ranker {
    c: f64,
}

impl InL2Ranker {
    pub const DEFAULT_C: f64 = 1.0;

    /// Fails when `c` is not a finite, strictly positive number
    pub fn new(c: f64) -> Result<Self> {
        if !c.is_finite() || c <= 0.0 {
            return Err(EvalError::invalid_configuration(
                "inl2.c",
                format!("must be > 0, got {}", c),
            ));
        }
        Ok(Self { c })
    }

    pub fn from_config(config: &InL2Config) -> Result<Self> {
        Self::new(config.c)
    }
}

impl Default for InL2Ranker {
    fn default() -> Self {
        Self {
            c: Self::DEFAULT_C,
        }
    }
}

impl RankingFunction for InL2Ranker {
    fn name(&self) -> &str {
        "inl2"
    }

    fn score_term(&self, sd: &ScoreData) -> f64 {
        if sd.doc_term_count == 0.0 {
            return 0.0;
        }

        let tfn = sd.doc_term_count * (1.0 + sd.avg_dl / sd.doc_size).log2();
        let informativeness =
            ((sd.num_docs as f64 + 1.0) / (sd.corpus_term_count + 0.5)).log2();

        sd.query_term_weight * (tfn / (tfn + self.c)) * informativeness
    }
}
