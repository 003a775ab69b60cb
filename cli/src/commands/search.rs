use anyhow::Result;
use rankeval_core::ranker_from_config;
use std::path::Path;

use super::context::{load_config, load_index};
use super::ui;
use super::CliRanker;

pub fn handle_search(
    config_path: Option<&Path>,
    query: &str,
    ranker: CliRanker,
    top: Option<usize>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let index = load_index(&config)?;
    let ranker = ranker_from_config(ranker.into(), &config)?;
    let top_k = top.unwrap_or(config.query_runner.top_k);

    let results = ranker.score(&index, query, top_k)?;

    ui::print_header(&format!("{} results for: {}", ranker.name(), query));
    if results.is_empty() {
        println!("No matching documents.");
        return Ok(());
    }
    for (rank, doc) in results.iter().enumerate() {
        println!("{:>4}. doc {:<8} {:.6}", rank + 1, doc.doc_id, doc.score);
    }
    Ok(())
}
