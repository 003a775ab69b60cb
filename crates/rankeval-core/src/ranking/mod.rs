//! Ranking functions
//!
//! A ranking function only knows how to score one query term against one
//! document. Accumulating those partial scores over postings and keeping the
//! best `k` documents is shared retrieval logic in [`crate::retriever`].

pub mod bm25;
pub mod inl2;

pub use bm25::Bm25Ranker;
pub use inl2::InL2Ranker;

use crate::error::{EvalError, Result};
use crate::index::Index;
use crate::retriever::{run_query, RankedResult};
use crate::score::ScoreData;
use rankeval_config::Config;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scores a single query term against a single document
///
/// `score_term` must be a pure function of its input and of parameters fixed
/// at construction time, so rankers can be shared across worker threads.
pub trait RankingFunction: Send + Sync {
    /// Short identifier used in logs and artifact names
    fn name(&self) -> &str;

    /// Partial score contributed by one term; summed per document
    fn score_term(&self, sd: &ScoreData) -> f64;

    /// Top-`k` documents for `query` under this ranking function
    fn score(&self, index: &dyn Index, query: &str, k: usize) -> Result<RankedResult> {
        run_query(index, self, query, k)
    }
}

impl<R: RankingFunction + ?Sized> RankingFunction for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn score_term(&self, sd: &ScoreData) -> f64 {
        (**self).score_term(sd)
    }
}

/// The ranking functions that can be built from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankerKind {
    InL2,
    Bm25,
}

impl RankerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankerKind::InL2 => "inl2",
            RankerKind::Bm25 => "bm25",
        }
    }
}

impl fmt::Display for RankerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankerKind {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "inl2" => Ok(RankerKind::InL2),
            "bm25" | "okapi-bm25" => Ok(RankerKind::Bm25),
            other => Err(EvalError::invalid_configuration(
                "ranker",
                format!("unknown ranking function '{}' (expected inl2 or bm25)", other),
            )),
        }
    }
}

/// Build a ranking function from its configuration section
pub fn ranker_from_config(kind: RankerKind, config: &Config) -> Result<Box<dyn RankingFunction>> {
    Ok(match kind {
        RankerKind::InL2 => Box::new(InL2Ranker::from_config(&config.inl2)?),
        RankerKind::Bm25 => Box::new(Bm25Ranker::from_config(&config.bm25)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in [RankerKind::InL2, RankerKind::Bm25] {
            assert_eq!(kind.as_str().parse::<RankerKind>().unwrap(), kind);
        }
        assert_eq!("OKAPI-BM25".parse::<RankerKind>().unwrap(), RankerKind::Bm25);
    }

    #[test]
    fn test_unknown_kind_is_configuration_error() {
        let err = "dirichlet".parse::<RankerKind>().unwrap_err();
        assert!(matches!(err, EvalError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_ranker_from_config_uses_sections() {
        let mut config = Config::default();
        config.inl2.c = 2.0;
        let ranker = ranker_from_config(RankerKind::InL2, &config).unwrap();
        assert_eq!(ranker.name(), "inl2");

        config.bm25.b = 3.0;
        let err = ranker_from_config(RankerKind::Bm25, &config).err().unwrap();
        match err {
            EvalError::InvalidConfiguration { parameter, .. } => assert_eq!(parameter, "bm25.b"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
