//! Evaluation settings

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the average precision sum is normalized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApNormalization {
    /// Divide by the full number of relevant documents for the query
    #[default]
    Full,
    /// Divide by `min(relevant, cutoff)`
    Truncated,
}

/// Relevance judgments and metric parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// TREC-style qrels file: `<query-id> <doc-id> <grade>` per line
    #[serde(default = "default_qrels_path")]
    pub qrels_path: PathBuf,

    /// Rank depth for average precision; defaults to `query-runner.top-k`
    #[serde(default)]
    pub cutoff: Option<usize>,

    #[serde(default)]
    pub normalization: ApNormalization,

    /// Significance level used when reporting paired comparisons
    #[serde(default = "default_alpha")]
    pub alpha: f64,

    /// Worker threads for the query loop (0 = one per core)
    #[serde(default)]
    pub threads: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            qrels_path: default_qrels_path(),
            cutoff: None,
            normalization: ApNormalization::default(),
            alpha: default_alpha(),
            threads: 0,
        }
    }
}

impl crate::validation::Validate for EvaluationConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::validate_positive;

        if let Some(cutoff) = self.cutoff {
            validate_positive("evaluation.cutoff", cutoff, 0)?;
        }

        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "evaluation.alpha".to_string(),
                value: self.alpha,
                min: 0.0,
                max: 1.0,
            });
        }

        Ok(())
    }
}

fn default_qrels_path() -> PathBuf {
    PathBuf::from("qrels.txt")
}

fn default_alpha() -> f64 {
    0.05
}
