//! Query runner settings

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where queries come from and how deep to retrieve
///
/// Keys are kebab-case (`query-path`, `query-id-start`, `top-k`) to stay
/// compatible with existing `[query-runner]` tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct QueryRunnerConfig {
    /// Plain-text query file, one query per line
    #[serde(default = "default_query_path")]
    pub query_path: PathBuf,

    /// Identifier assigned to the first line of the query file
    #[serde(default)]
    pub query_id_start: u64,

    /// Number of documents retrieved per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for QueryRunnerConfig {
    fn default() -> Self {
        Self {
            query_path: default_query_path(),
            query_id_start: 0,
            top_k: default_top_k(),
        }
    }
}

impl crate::validation::Validate for QueryRunnerConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::validate_positive;

        validate_positive("query-runner.top-k", self.top_k, 0)?;

        if self.top_k > MAX_TOP_K {
            return Err(ConfigError::ValidationError {
                field: "query-runner.top-k".to_string(),
                message: format!("top-k too large ({}), use <= {}", self.top_k, MAX_TOP_K),
            });
        }

        Ok(())
    }
}

const MAX_TOP_K: usize = 10_000;

fn default_query_path() -> PathBuf {
    PathBuf::from("queries.txt")
}

fn default_top_k() -> usize {
    10
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validate;

    #[test]
    fn test_default_is_valid() {
        let config = QueryRunnerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.query_path, PathBuf::from("queries.txt"));
    }

    #[test]
    fn test_zero_top_k_invalid() {
        let config = QueryRunnerConfig {
            top_k: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_huge_top_k_invalid() {
        let config = QueryRunnerConfig {
            top_k: 50_000,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
