//! Configuration management for rankeval
//!
//! This crate provides a validated configuration system with support for:
//! - Multiple formats (TOML, YAML, JSON)
//! - Config validation with helpful error messages
//! - Config merging (file + environment + explicit overrides)
//!
//! # Example
//!
//! ```no_run
//! use rankeval_config::Config;
//!
//! // Load from default location (.rankeval.{toml,yml,json})
//! let config = Config::load()?;
//!
//! // Or load from specific file
//! let config = Config::from_file("config.toml")?;
//!
//! let top_k = config.query_runner.top_k;
//! let c = config.inl2.c;
//! # Ok::<(), rankeval_config::ConfigError>(())
//! ```

pub mod error;
pub mod loader;
pub mod types;
pub mod validation;

pub use error::{ConfigError, ErrorFormatter, Result};
pub use loader::ConfigBuilder;
pub use types::*;

pub use validation::Validate;
