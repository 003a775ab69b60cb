use anyhow::{anyhow, Context, Result};
use rankeval_config::{Config, ErrorFormatter};
use rankeval_core::{load_queries, MemoryIndex, QrelsJudgments, Query};
use std::path::Path;
use tracing::info;

/// Everything a run reads, loaded once before scoring starts
pub struct RunContext {
    pub config: Config,
    pub index: MemoryIndex,
    pub judgments: QrelsJudgments,
    pub queries: Vec<Query>,
}

impl RunContext {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = load_config(config_path)?;
        let index = load_index(&config)?;

        let judgments = QrelsJudgments::from_path(&config.evaluation.qrels_path)
            .with_context(|| {
                format!(
                    "Failed to load judgments from {}",
                    config.evaluation.qrels_path.display()
                )
            })?;
        let queries = load_queries(
            &config.query_runner.query_path,
            config.query_runner.query_id_start,
        )
        .with_context(|| {
            format!(
                "Failed to load queries from {}",
                config.query_runner.query_path.display()
            )
        })?;

        info!(
            queries = queries.len(),
            judged_queries = judgments.query_count(),
            "loaded evaluation inputs"
        );

        Ok(Self {
            config,
            index,
            judgments,
            queries,
        })
    }
}

pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let loaded = match config_path {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    };
    loaded.map_err(|e| anyhow!("{}", ErrorFormatter::new(&e)))
}

pub fn load_index(config: &Config) -> Result<MemoryIndex> {
    let index = MemoryIndex::from_line_corpus(&config.corpus.path).with_context(|| {
        format!("Failed to load corpus from {}", config.corpus.path.display())
    })?;
    Ok(index)
}
