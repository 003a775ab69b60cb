//! In-memory inverted index over a small document collection

use super::{DocId, Index, Posting};
use crate::error::{EvalError, Result};
use itertools::Itertools;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default)]
struct TermStats {
    postings: Vec<Posting>,
    corpus_count: f64,
}

/// Inverted index held entirely in memory
///
/// Document ids are dense: the i-th document added gets id `i`.
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex {
    terms: HashMap<String, TermStats>,
    doc_lengths: Vec<f64>,
    doc_unique_terms: Vec<u64>,
    total_length: f64,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_documents<I, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::new();
        for document in documents {
            index.add_document(document.as_ref());
        }
        index
    }

    /// Build from a line corpus: one document per line, id = line number
    pub fn from_line_corpus(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| EvalError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let index = Self::from_documents(content.lines());
        debug!(
            path = %path.display(),
            docs = index.doc_count(),
            terms = index.terms.len(),
            "loaded line corpus"
        );
        Ok(index)
    }

    /// Tokenize and index a document, returning its id
    pub fn add_document(&mut self, text: &str) -> DocId {
        let doc_id = self.doc_lengths.len() as DocId;
        let counts = tokenize(text).counts();

        let length: usize = counts.values().sum();
        self.doc_lengths.push(length as f64);
        self.doc_unique_terms.push(counts.len() as u64);
        self.total_length += length as f64;

        for (term, count) in counts {
            let stats = self.terms.entry(term).or_default();
            stats.postings.push(Posting {
                doc_id,
                term_count: count as f64,
            });
            stats.corpus_count += count as f64;
        }

        doc_id
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }
}

impl Index for MemoryIndex {
    fn postings_for(&self, term: &str) -> Cow<'_, [Posting]> {
        match self.terms.get(term) {
            Some(stats) => Cow::Borrowed(stats.postings.as_slice()),
            None => Cow::Borrowed(&[][..]),
        }
    }

    fn doc_length(&self, doc_id: DocId) -> f64 {
        self.doc_lengths.get(doc_id as usize).copied().unwrap_or(0.0)
    }

    fn doc_unique_terms(&self, doc_id: DocId) -> u64 {
        self.doc_unique_terms
            .get(doc_id as usize)
            .copied()
            .unwrap_or(0)
    }

    fn avg_doc_length(&self) -> f64 {
        if self.doc_lengths.is_empty() {
            0.0
        } else {
            self.total_length / self.doc_lengths.len() as f64
        }
    }

    fn doc_count(&self) -> u64 {
        self.doc_lengths.len() as u64
    }

    fn corpus_term_count(&self, term: &str) -> f64 {
        self.terms.get(term).map(|s| s.corpus_count).unwrap_or(0.0)
    }

    fn document_frequency(&self, term: &str) -> u64 {
        self.terms
            .get(term)
            .map(|s| s.postings.len() as u64)
            .unwrap_or(0)
    }

    /// Query term weight is the number of times the term occurs in the query
    fn analyze(&self, text: &str) -> Vec<(String, f64)> {
        tokenize(text)
            .counts()
            .into_iter()
            .map(|(term, count)| (term, count as f64))
            .sorted_by(|a, b| a.0.cmp(&b.0))
            .collect()
    }
}

/// Lowercased alphanumeric runs
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn index() -> MemoryIndex {
        MemoryIndex::from_documents([
            "the cat sat on the mat",
            "dogs and cats",
            "the dog chased the cat",
        ])
    }

    #[test]
    fn test_collection_statistics() {
        let index = index();
        assert_eq!(index.doc_count(), 3);
        assert_eq!(index.doc_length(0), 6.0);
        assert_eq!(index.doc_unique_terms(0), 5);
        assert!((index.avg_doc_length() - 14.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_term_statistics() {
        let index = index();
        assert_eq!(index.corpus_term_count("the"), 4.0);
        assert_eq!(index.document_frequency("the"), 2);
        assert_eq!(index.document_frequency("cat"), 2);

        let postings = index.postings_for("the");
        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0], Posting { doc_id: 0, term_count: 2.0 });
        assert_eq!(postings[1], Posting { doc_id: 2, term_count: 2.0 });
    }

    #[test]
    fn test_unknown_term_has_no_postings() {
        let index = index();
        assert!(index.postings_for("zebra").is_empty());
        assert_eq!(index.corpus_term_count("zebra"), 0.0);
        assert_eq!(index.document_frequency("zebra"), 0);
    }

    #[test]
    fn test_analyze_counts_and_sorts_terms() {
        let terms = index().analyze("Cat, cat & DOG!");
        assert_eq!(
            terms,
            vec![("cat".to_string(), 2.0), ("dog".to_string(), 1.0)]
        );
        assert!(index().analyze("  ...  ").is_empty());
    }

    #[test]
    fn test_line_corpus() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "first document").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "third document here").unwrap();

        let index = MemoryIndex::from_line_corpus(file.path()).unwrap();
        assert_eq!(index.doc_count(), 3);
        assert_eq!(index.doc_length(1), 0.0);
        assert_eq!(index.document_frequency("document"), 2);
    }

    #[test]
    fn test_missing_corpus_is_io_error() {
        let err = MemoryIndex::from_line_corpus(Path::new("/no/such/corpus.txt")).unwrap_err();
        assert!(matches!(err, EvalError::Io { .. }));
    }
}
