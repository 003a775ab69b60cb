//! Configuration type definitions
//!
//! One module per concern. Each type carries its own defaults and validation.

pub mod bm25;
pub mod corpus;
pub mod evaluation;
pub mod inl2;
pub mod output;
pub mod query_runner;

pub use bm25::Bm25Config;
pub use corpus::CorpusConfig;
pub use evaluation::{ApNormalization, EvaluationConfig};
pub use inl2::InL2Config;
pub use output::OutputConfig;
pub use query_runner::QueryRunnerConfig;

use serde::{Deserialize, Serialize};

/// Top-level configuration for an evaluation run
///
/// Built once at startup and passed by reference to everything that needs it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Query file location, id offset and retrieval depth
    #[serde(default, rename = "query-runner")]
    pub query_runner: QueryRunnerConfig,

    /// InL2 ranking parameters
    #[serde(default)]
    pub inl2: InL2Config,

    /// Okapi BM25 ranking parameters
    #[serde(default)]
    pub bm25: Bm25Config,

    /// Relevance judgments and metric settings
    #[serde(default)]
    pub evaluation: EvaluationConfig,

    /// Document source for the in-memory index
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Result artifact locations
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Depth at which average precision is measured
    ///
    /// Falls back to the retrieval depth when no explicit cutoff is set.
    pub fn cutoff(&self) -> usize {
        self.evaluation.cutoff.unwrap_or(self.query_runner.top_k)
    }
}

impl crate::validation::Validate for Config {
    fn validate(&self) -> crate::error::Result<()> {
        self.query_runner.validate()?;
        self.inl2.validate()?;
        self.bm25.validate()?;
        self.evaluation.validate()?;
        Ok(())
    }
}
