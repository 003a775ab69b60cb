//! Relevance judgments in TREC qrels format

use super::{DocId, Judgments, QueryId};
use crate::error::{EvalError, Result};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Binary relevance judgments
///
/// Accepts `<query-id> <doc-id> <grade>` lines and the four-column TREC form
/// `<query-id> <iteration> <doc-id> <grade>`. Any grade above zero counts as
/// relevant. Blank lines and lines starting with `#` are skipped.
#[derive(Debug, Clone, Default)]
pub struct QrelsJudgments {
    relevant: HashMap<QueryId, HashSet<DocId>>,
}

impl QrelsJudgments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| EvalError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse qrels text; `source` only labels error messages
    pub fn parse(content: &str, source: &Path) -> Result<Self> {
        let mut judgments = Self::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parse_error = |message: String| EvalError::Parse {
                path: source.to_path_buf(),
                line: line_no + 1,
                message,
            };

            let fields: Vec<&str> = line.split_whitespace().collect();
            let (query, doc, grade) = match fields.as_slice() {
                [query, doc, grade] => (*query, *doc, *grade),
                [query, _iteration, doc, grade] => (*query, *doc, *grade),
                _ => {
                    return Err(parse_error(format!(
                        "expected 3 or 4 fields, found {}",
                        fields.len()
                    )))
                }
            };

            let query_id: QueryId = query
                .parse()
                .map_err(|_| parse_error(format!("invalid query id '{}'", query)))?;
            let doc_id: DocId = doc
                .parse()
                .map_err(|_| parse_error(format!("invalid document id '{}'", doc)))?;
            let grade: i64 = grade
                .parse()
                .map_err(|_| parse_error(format!("invalid relevance grade '{}'", grade)))?;

            judgments.insert(query_id, doc_id, grade > 0);
        }

        Ok(judgments)
    }

    /// Record a judgment; non-relevant judgments only register the query
    pub fn insert(&mut self, query_id: QueryId, doc_id: DocId, relevant: bool) {
        let docs = self.relevant.entry(query_id).or_default();
        if relevant {
            docs.insert(doc_id);
        }
    }

    pub fn query_count(&self) -> usize {
        self.relevant.len()
    }
}

impl Judgments for QrelsJudgments {
    fn relevant_docs(&self, query_id: QueryId) -> Cow<'_, HashSet<DocId>> {
        match self.relevant.get(&query_id) {
            Some(docs) => Cow::Borrowed(docs),
            None => Cow::Owned(HashSet::new()),
        }
    }

    fn has_query(&self, query_id: QueryId) -> bool {
        self.relevant.contains_key(&query_id)
    }
}
