//! Query files: one query per line

use crate::error::{EvalError, Result};
use crate::index::QueryId;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub id: QueryId,
    pub text: String,
}

/// Read queries, assigning ids by line order starting at `id_start`
///
/// Every line gets an id, blank ones included, so ids stay aligned with
/// the judgment file.
pub fn load_queries(path: &Path, id_start: QueryId) -> Result<Vec<Query>> {
    let content = fs::read_to_string(path).map_err(|source| EvalError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_queries(&content, id_start))
}

pub fn parse_queries(content: &str, id_start: QueryId) -> Vec<Query> {
    content
        .lines()
        .zip(id_start..)
        .map(|(line, id)| Query {
            id,
            text: line.trim().to_string(),
        })
        .collect()
}
