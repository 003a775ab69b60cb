//! The index and judgment services the evaluator reads from
//!
//! Both are treated as immutable for the duration of a run, which is what
//! lets the runner share them across worker threads without locking.

pub mod memory;
pub mod qrels;

pub use memory::MemoryIndex;
pub use qrels::QrelsJudgments;

use std::borrow::Cow;
use std::collections::HashSet;

/// Document identifier, unique within the collection
pub type DocId = u64;

/// Query identifier: position in the query file plus the configured offset
pub type QueryId = u64;

/// One entry of a term's posting list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Posting {
    pub doc_id: DocId,
    /// Occurrences of the term in the document
    pub term_count: f64,
}

/// Read access to an inverted index
pub trait Index: Send + Sync {
    /// Documents containing `term`; empty when the term is unknown
    fn postings_for(&self, term: &str) -> Cow<'_, [Posting]>;

    /// Length of the document in tokens
    fn doc_length(&self, doc_id: DocId) -> f64;

    /// Number of distinct terms in the document
    fn doc_unique_terms(&self, doc_id: DocId) -> u64;

    fn avg_doc_length(&self) -> f64;

    /// Number of documents in the collection
    fn doc_count(&self) -> u64;

    /// Occurrences of `term` across the whole collection
    fn corpus_term_count(&self, term: &str) -> f64;

    /// Number of documents containing `term`
    fn document_frequency(&self, term: &str) -> u64;

    /// Turn query text into weighted terms
    fn analyze(&self, text: &str) -> Vec<(String, f64)>;
}

/// Relevance judgments keyed by query id
pub trait Judgments: Send + Sync {
    /// Documents judged relevant for the query; empty when the query is unjudged
    fn relevant_docs(&self, query_id: QueryId) -> Cow<'_, HashSet<DocId>>;

    fn has_query(&self, query_id: QueryId) -> bool {
        !self.relevant_docs(query_id).is_empty()
    }
}
