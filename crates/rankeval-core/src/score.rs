//! Per-term scoring statistics

/// Statistics for one (query term, document) pair, drawn from the index
///
/// The index guarantees `doc_size > 0`, `num_docs > 0`,
/// `corpus_term_count > 0` and `doc_count > 0` for any term that occurs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreData {
    /// Occurrences of the term in this document
    pub doc_term_count: f64,
    /// Distinct terms in this document
    pub doc_unique_terms: u64,
    /// Document length in tokens
    pub doc_size: f64,
    /// Average document length over the collection
    pub avg_dl: f64,
    /// Documents in the collection
    pub num_docs: u64,
    /// Documents containing the term
    pub doc_count: u64,
    /// Occurrences of the term across the collection
    pub corpus_term_count: f64,
    /// Weight of the term within the query
    pub query_term_weight: f64,
}
