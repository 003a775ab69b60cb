use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EvalError>;

/// Failures that abort an evaluation run
///
/// Missing per-query data (unknown terms, queries without judgments) is not
/// an error: it degrades to a zero contribution and the run continues.
#[derive(Debug, Error)]
pub enum EvalError {
    /// A ranking function parameter is outside its valid range
    #[error("invalid configuration: {parameter}: {message}")]
    InvalidConfiguration { parameter: String, message: String },

    /// An operation was called with an argument it cannot work with
    #[error("invalid argument: {argument}: {message}")]
    InvalidArgument { argument: String, message: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

impl EvalError {
    pub fn invalid_configuration(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    pub fn invalid_argument(argument: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            message: message.into(),
        }
    }
}
