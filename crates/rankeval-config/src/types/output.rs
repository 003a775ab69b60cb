//! Result artifact settings

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where per-query average precision and p-value artifacts are written
///
/// Nothing is written when `directory` is unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl OutputConfig {
    /// `<directory>/<ranker>.avg_p.txt`
    pub fn average_precision_path(&self, ranker: &str) -> Option<PathBuf> {
        self.directory
            .as_ref()
            .map(|dir| dir.join(format!("{}.avg_p.txt", ranker)))
    }

    /// `<directory>/significance.txt`
    pub fn significance_path(&self) -> Option<PathBuf> {
        self.directory
            .as_ref()
            .map(|dir| dir.join("significance.txt"))
    }
}
