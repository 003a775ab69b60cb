//! Corpus location for the in-memory index

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Line corpus: one document per line, document id = line number from 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusConfig {
    #[serde(default = "default_corpus_path")]
    pub path: PathBuf,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: default_corpus_path(),
        }
    }
}

fn default_corpus_path() -> PathBuf {
    PathBuf::from("corpus.txt")
}
