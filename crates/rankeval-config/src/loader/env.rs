//! Environment variable configuration overlay
//!
//! Variables take the form `RANKEVAL_<SECTION>_<FIELD>=value`:
//! - `RANKEVAL_QUERY_TOP_K=20`
//! - `RANKEVAL_INL2_C=0.8`
//! - `RANKEVAL_BM25_K1=1.4`
//! - `RANKEVAL_EVAL_NORMALIZATION=truncated`
//!
//! Variables outside the known sections (`RANKEVAL_HOME`, say) are skipped.
//! A known section with an unknown field is an error.

use crate::{error::ConfigError, types::*, Config, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

const PREFIX: &str = "RANKEVAL_";

const SECTIONS: &[&str] = &["query", "inl2", "bm25", "eval", "corpus", "output"];

/// Overwrite fields of `config` with every `RANKEVAL_` variable set
pub fn apply(config: &mut Config) -> Result<()> {
    let mut env_vars: Vec<(String, String)> =
        env::vars().filter(|(k, _)| k.starts_with(PREFIX)).collect();

    // Deterministic application order
    env_vars.sort();

    for (key, value) in env_vars {
        apply_env_var(config, &key, &value)?;
    }
    Ok(())
}

fn apply_env_var(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let stripped = key.strip_prefix(PREFIX).unwrap_or(key);

    let (section, field) = match stripped.split_once('_') {
        Some((section, field)) => (section.to_lowercase(), field.to_lowercase()),
        None => (stripped.to_lowercase(), String::new()),
    };

    if !SECTIONS.contains(&section.as_str()) {
        warn!(var = key, "ignoring environment variable outside rankeval config sections");
        return Ok(());
    }
    if field.is_empty() {
        return Err(ConfigError::EnvVarError {
            var: key.to_string(),
            message: "Expected format: RANKEVAL_<section>_<field>".to_string(),
        });
    }

    match section.as_str() {
        "query" => apply_query_var(&mut config.query_runner, key, &field, value),
        "inl2" => apply_inl2_var(&mut config.inl2, key, &field, value),
        "bm25" => apply_bm25_var(&mut config.bm25, key, &field, value),
        "eval" => apply_eval_var(&mut config.evaluation, key, &field, value),
        "corpus" => match field.as_str() {
            "path" => {
                config.corpus.path = PathBuf::from(value);
                Ok(())
            }
            _ => Err(unknown_field(key, &field)),
        },
        "output" => match field.as_str() {
            "directory" | "dir" => {
                config.output.directory = Some(PathBuf::from(value));
                Ok(())
            }
            _ => Err(unknown_field(key, &field)),
        },
        _ => Ok(()),
    }
}

fn apply_query_var(
    config: &mut QueryRunnerConfig,
    key: &str,
    field: &str,
    value: &str,
) -> Result<()> {
    match field {
        "path" => config.query_path = PathBuf::from(value),
        "id_start" => config.query_id_start = parse_value(key, value, "integer")?,
        "top_k" => config.top_k = parse_value(key, value, "integer")?,
        _ => return Err(unknown_field(key, field)),
    }
    Ok(())
}

fn apply_inl2_var(config: &mut InL2Config, key: &str, field: &str, value: &str) -> Result<()> {
    match field {
        "c" => config.c = parse_value(key, value, "float")?,
        _ => return Err(unknown_field(key, field)),
    }
    Ok(())
}

fn apply_bm25_var(config: &mut Bm25Config, key: &str, field: &str, value: &str) -> Result<()> {
    match field {
        "k1" => config.k1 = parse_value(key, value, "float")?,
        "b" => config.b = parse_value(key, value, "float")?,
        "k3" => config.k3 = parse_value(key, value, "float")?,
        _ => return Err(unknown_field(key, field)),
    }
    Ok(())
}

fn apply_eval_var(
    config: &mut EvaluationConfig,
    key: &str,
    field: &str,
    value: &str,
) -> Result<()> {
    match field {
        "qrels_path" | "qrels" => config.qrels_path = PathBuf::from(value),
        "cutoff" => config.cutoff = Some(parse_value(key, value, "integer")?),
        "alpha" => config.alpha = parse_value(key, value, "float")?,
        "threads" => config.threads = parse_value(key, value, "integer")?,
        "normalization" => {
            config.normalization = match value.to_lowercase().as_str() {
                "full" => ApNormalization::Full,
                "truncated" => ApNormalization::Truncated,
                _ => {
                    return Err(ConfigError::invalid_enum(
                        "evaluation.normalization",
                        value,
                        &["full", "truncated"],
                    ))
                }
            };
        }
        _ => return Err(unknown_field(key, field)),
    }
    Ok(())
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.trim().parse().map_err(|_| ConfigError::EnvVarError {
        var: key.to_string(),
        message: format!("Invalid {}: {}", kind, value),
    })
}

fn unknown_field(key: &str, field: &str) -> ConfigError {
    ConfigError::EnvVarError {
        var: key.to_string(),
        message: format!("Unknown field: {}", field),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    // Serializes every test in the crate that touches RANKEVAL_ variables
    pub(crate) static ENV_LOCK: Mutex<()> = Mutex::new(());

    pub(crate) fn cleanup_env_vars() {
        let keys: Vec<String> = env::vars()
            .filter(|(k, _)| k.starts_with(PREFIX))
            .map(|(k, _)| k)
            .collect();
        for key in keys {
            env::remove_var(&key);
        }
    }

    #[test]
    fn test_bm25_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_env_vars();
        env::set_var("RANKEVAL_BM25_K1", "1.6");
        env::set_var("RANKEVAL_BM25_K3", "7");
        let mut config = Config::default();
        apply(&mut config).unwrap();
        assert_eq!(config.bm25.k1, 1.6);
        assert_eq!(config.bm25.k3, 7.0);
        cleanup_env_vars();
    }

    #[test]
    fn test_query_id_start_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_env_vars();
        env::set_var("RANKEVAL_QUERY_ID_START", "1");
        let mut config = Config::default();
        apply(&mut config).unwrap();
        assert_eq!(config.query_runner.query_id_start, 1);
        cleanup_env_vars();
    }

    #[test]
    fn test_normalization_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_env_vars();
        env::set_var("RANKEVAL_EVAL_NORMALIZATION", "Truncated");
        let mut config = Config::default();
        apply(&mut config).unwrap();
        assert_eq!(config.evaluation.normalization, ApNormalization::Truncated);
        cleanup_env_vars();
    }

    #[test]
    fn test_bad_float_is_error() {
        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_env_vars();
        env::set_var("RANKEVAL_INL2_C", "one");
        assert!(apply(&mut Config::default()).is_err());
        cleanup_env_vars();
    }

    #[test]
    fn test_unrelated_variables_are_skipped() {
        let mut config = Config::default();
        apply_env_var(&mut config, "RANKEVAL_HOME", "/opt/rankeval").unwrap();
        apply_env_var(&mut config, "RANKEVAL_DIRICHLET_MU", "2000").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unrelated_variable_does_not_block_apply() {
        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_env_vars();
        env::set_var("RANKEVAL_HOME", "/opt/rankeval");
        env::set_var("RANKEVAL_INL2_C", "2.5");
        let mut config = Config::default();
        apply(&mut config).unwrap();
        assert_eq!(config.inl2.c, 2.5);
        cleanup_env_vars();
    }

    #[test]
    fn test_known_section_errors_stay_fatal() {
        let mut config = Config::default();
        assert!(apply_env_var(&mut config, "RANKEVAL_BM25", "1").is_err());
        assert!(apply_env_var(&mut config, "RANKEVAL_BM25_K2", "1").is_err());
    }

    #[test]
    fn test_no_env_vars_leave_config_untouched() {
        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_env_vars();
        let mut config = Config::default();
        config.bm25.k1 = 1.9;
        apply(&mut config).unwrap();
        assert_eq!(config.bm25.k1, 1.9);
    }
}
