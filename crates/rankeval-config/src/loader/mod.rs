//! Configuration loading from various sources

pub mod env;
pub mod file;
pub mod formats;
pub mod merge;

use crate::{Config, Result, Validate};
use std::path::{Path, PathBuf};

/// Format for configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

/// Configuration source for layered loading
#[derive(Debug, Clone)]
pub enum ConfigSource {
    File(PathBuf),
    Environment,
    Explicit(Config),
}

/// Builder for loading and merging configurations
///
/// Sources apply in the order they are added, normally
/// defaults < file < environment < explicit overrides. A file or the
/// environment overrides exactly the keys it sets; an explicit [`Config`]
/// replaces everything layered before it.
///
/// # Example
///
/// ```no_run
/// use rankeval_config::loader::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .with_file("eval.toml")
///     .with_env()
///     .build()?;
/// # Ok::<(), rankeval_config::ConfigError>(())
/// ```
pub struct ConfigBuilder {
    sources: Vec<ConfigSource>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.sources
            .push(ConfigSource::File(path.as_ref().to_path_buf()));
        self
    }

    pub fn with_env(mut self) -> Self {
        self.sources.push(ConfigSource::Environment);
        self
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.sources.push(ConfigSource::Explicit(config));
        self
    }

    /// Layer all sources in order and validate the result
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        for source in self.sources {
            match source {
                ConfigSource::File(path) => {
                    let layer = file::load_layer(&path)?;
                    config = merge::overlay(&config, layer)?;
                }
                ConfigSource::Environment => env::apply(&mut config)?,
                ConfigSource::Explicit(explicit_config) => config = explicit_config,
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
        Self::new().with_file(path).build()
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Load configuration from default locations in the working directory
    ///
    /// Searches `.rankeval.toml`, `.rankeval.yml`, `.rankeval.yaml`,
    /// `.rankeval.json` and uses the first one found. Falls back to defaults.
    /// Environment overlays are always applied.
    pub fn load() -> Result<Self> {
        let default_paths = [
            ".rankeval.toml",
            ".rankeval.yml",
            ".rankeval.yaml",
            ".rankeval.json",
        ];

        let mut builder = ConfigBuilder::new();

        if let Some(path) = default_paths.iter().find(|p| Path::new(p).exists()) {
            builder = builder.with_file(path);
        }

        builder.with_env().build()
    }

    /// Load configuration from a specific file, plus environment overlays
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        ConfigBuilder::new().with_file(path).with_env().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::env::tests::{cleanup_env_vars, ENV_LOCK};
    use std::env;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_env_vars();
        let config = Config::load().unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_default() {
        let config = ConfigBuilder::new().build().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_builder_with_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_env_vars();
        env::set_var("RANKEVAL_QUERY_TOP_K", "25");
        let config = ConfigBuilder::new().with_env().build().unwrap();
        assert_eq!(config.query_runner.top_k, 25);
        cleanup_env_vars();
    }

    #[test]
    fn test_env_overrides_file() {
        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_env_vars();

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[bm25]\nk1 = 1.5\nb = 0.5").unwrap();

        env::set_var("RANKEVAL_BM25_B", "0.3");
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.bm25.k1, 1.5);
        assert_eq!(config.bm25.b, 0.3);
        cleanup_env_vars();
    }

    #[test]
    fn test_env_can_restore_defaults_set_by_file() {
        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_env_vars();

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[bm25]\nk1 = 1.5\n\n[query-runner]\ntop-k = 50").unwrap();

        env::set_var("RANKEVAL_BM25_K1", "1.2");
        env::set_var("RANKEVAL_QUERY_TOP_K", "10");
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.bm25.k1, 1.2);
        assert_eq!(config.query_runner.top_k, 10);
        cleanup_env_vars();
    }

    #[test]
    fn test_later_file_can_restore_defaults() {
        let mut first = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(first, "[inl2]\nc = 4.0\n\n[bm25]\nb = 0.3").unwrap();
        let mut second = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(second, r#"{{"inl2": {{"c": 1.0}}}}"#).unwrap();

        let config = ConfigBuilder::new()
            .with_file(first.path())
            .with_file(second.path())
            .build()
            .unwrap();
        assert_eq!(config.inl2.c, 1.0);
        assert_eq!(config.bm25.b, 0.3);
    }

    #[test]
    fn test_explicit_config_replaces_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[query-runner]\ntop-k = 50").unwrap();

        let config = ConfigBuilder::new()
            .with_file(file.path())
            .with_config(Config::default())
            .build()
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_build_rejects_invalid_explicit_config() {
        let mut bad = Config::default();
        bad.inl2.c = -1.0;
        let err = ConfigBuilder::new().with_config(bad).build().unwrap_err();
        assert_eq!(err.field(), Some("inl2.c"));
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(ConfigBuilder::from_file("/definitely/not/here.toml").is_err());
    }
}
