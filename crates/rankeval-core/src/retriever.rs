//! Top-k retrieval over posting lists
//!
//! Work is proportional to the total length of the query terms' posting
//! lists, never to the collection size.

use crate::error::{EvalError, Result};
use crate::index::{DocId, Index};
use crate::ranking::RankingFunction;
use crate::score::ScoreData;
use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, BinaryHeap, HashMap};
use tracing::trace;

/// A retrieved document and its accumulated score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredDoc {
    pub doc_id: DocId,
    pub score: f64,
}

/// Documents sorted by score descending, ties by document id ascending
pub type RankedResult = Vec<ScoredDoc>;

/// Heap entry ordered by score, then by document id reversed
///
/// Under `Reverse`, the heap root is the entry to evict first: the lowest
/// score, and among equal scores the highest document id.
#[derive(Debug, Clone, Copy)]
struct HeapEntry(ScoredDoc);

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .score
            .total_cmp(&other.0.score)
            .then_with(|| other.0.doc_id.cmp(&self.0.doc_id))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

/// Bounded min-heap keeping the best `k` candidates seen so far
struct TopK {
    k: usize,
    heap: BinaryHeap<Reverse<HeapEntry>>,
}

impl TopK {
    /// `candidates` bounds the allocation; `k` may exceed it
    fn new(k: usize, candidates: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k.min(candidates)),
        }
    }

    fn push(&mut self, doc: ScoredDoc) {
        let entry = HeapEntry(doc);
        if self.heap.len() < self.k {
            self.heap.push(Reverse(entry));
        } else if let Some(worst) = self.heap.peek() {
            // Full Ord comparison so equal scores fall back to the id tie-break
            if entry > worst.0 {
                self.heap.pop();
                self.heap.push(Reverse(entry));
            }
        }
    }

    fn into_sorted_vec(self) -> RankedResult {
        let mut docs: RankedResult = self.heap.into_iter().map(|r| r.0 .0).collect();
        docs.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.doc_id.cmp(&b.doc_id))
        });
        docs
    }
}

/// Score `query_text` against `index` and return the best `top_k` documents
///
/// Terms the index does not know contribute nothing. A query with no
/// recognized terms yields an empty result rather than an error.
pub fn run_query<R>(
    index: &dyn Index,
    ranker: &R,
    query_text: &str,
    top_k: usize,
) -> Result<RankedResult>
where
    R: RankingFunction + ?Sized,
{
    if top_k == 0 {
        return Err(EvalError::invalid_argument(
            "top_k",
            "must be a positive integer, got 0",
        ));
    }

    // Merge duplicate terms; BTreeMap keeps per-document summation order fixed
    let mut query_terms: BTreeMap<String, f64> = BTreeMap::new();
    for (term, weight) in index.analyze(query_text) {
        *query_terms.entry(term).or_insert(0.0) += weight;
    }

    if query_terms.is_empty() {
        return Ok(Vec::new());
    }

    let num_docs = index.doc_count();
    let avg_dl = index.avg_doc_length();
    let mut accumulators: HashMap<DocId, f64> = HashMap::new();

    for (term, query_term_weight) in &query_terms {
        let postings = index.postings_for(term);
        if postings.is_empty() {
            trace!(term = %term, "term not in index");
            continue;
        }

        let corpus_term_count = index.corpus_term_count(term);
        let doc_count = match index.document_frequency(term) {
            0 => postings.len() as u64,
            df => df,
        };

        for posting in postings.iter() {
            if posting.term_count == 0.0 {
                continue;
            }
            let sd = ScoreData {
                doc_term_count: posting.term_count,
                doc_unique_terms: index.doc_unique_terms(posting.doc_id),
                doc_size: index.doc_length(posting.doc_id),
                avg_dl,
                num_docs,
                doc_count,
                corpus_term_count,
                query_term_weight: *query_term_weight,
            };
            *accumulators.entry(posting.doc_id).or_insert(0.0) += ranker.score_term(&sd);
        }
    }

    let mut top = TopK::new(top_k, accumulators.len());
    for (doc_id, score) in accumulators {
        top.push(ScoredDoc { doc_id, score });
    }

    Ok(top.into_sorted_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::MemoryIndex;
    use crate::ranking::{Bm25Ranker, InL2Ranker};

    /// Scores every matching term as its query weight
    struct Constant;

    impl RankingFunction for Constant {
        fn name(&self) -> &str {
            "constant"
        }

        fn score_term(&self, sd: &ScoreData) -> f64 {
            sd.query_term_weight
        }
    }

    fn corpus() -> MemoryIndex {
        MemoryIndex::from_documents([
            "rust borrow checker",
            "borrow money from a bank",
            "rust belt economy",
            "checker board games",
            "rust rust rust",
        ])
    }

    #[test]
    fn test_zero_top_k_is_invalid() {
        let err = run_query(&corpus(), &Constant, "rust", 0).unwrap_err();
        assert!(matches!(err, EvalError::InvalidArgument { .. }));
    }

    #[test]
    fn test_empty_query_yields_empty_result() {
        assert!(run_query(&corpus(), &Constant, "", 10).unwrap().is_empty());
        assert!(run_query(&corpus(), &Constant, "zebra", 10).unwrap().is_empty());
    }

    #[test]
    fn test_scores_accumulate_across_terms() {
        let results = run_query(&corpus(), &Constant, "rust borrow", 10).unwrap();
        assert_eq!(results[0], ScoredDoc { doc_id: 0, score: 2.0 });
        assert_eq!(results.len(), 4);
    }

    #[test]
    fn test_ties_break_by_doc_id() {
        let results = run_query(&corpus(), &Constant, "rust", 10).unwrap();
        let ids: Vec<DocId> = results.iter().map(|d| d.doc_id).collect();
        assert_eq!(ids, vec![0, 2, 4]);
    }

    #[test]
    fn test_top_k_truncates_keeping_lowest_ids_on_ties() {
        let results = run_query(&corpus(), &Constant, "rust", 2).unwrap();
        let ids: Vec<DocId> = results.iter().map(|d| d.doc_id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_huge_top_k_returns_every_match() {
        for top_k in [usize::MAX, 1 << 62] {
            let results = run_query(&corpus(), &Bm25Ranker::default(), "rust", top_k).unwrap();
            let mut ids: Vec<DocId> = results.iter().map(|d| d.doc_id).collect();
            ids.sort_unstable();
            assert_eq!(ids, vec![0, 2, 4]);
        }
    }

    #[test]
    fn test_repeated_query_terms_raise_weight() {
        let results = run_query(&corpus(), &Constant, "checker checker board", 10).unwrap();
        assert_eq!(results[0], ScoredDoc { doc_id: 3, score: 3.0 });
        assert_eq!(results[1], ScoredDoc { doc_id: 0, score: 2.0 });
    }

    #[test]
    fn test_real_rankers_prefer_term_dense_document() {
        let index = corpus();
        for ranker in [
            Box::new(InL2Ranker::default()) as Box<dyn RankingFunction>,
            Box::new(Bm25Ranker::default()),
        ] {
            let results = ranker.score(&index, "rust", 3).unwrap();
            assert_eq!(results[0].doc_id, 4, "{}", ranker.name());
            assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }

    #[test]
    fn test_results_are_reproducible() {
        let index = corpus();
        let ranker = Bm25Ranker::default();
        let first = run_query(&index, &ranker, "rust borrow checker", 3).unwrap();
        let second = run_query(&index, &ranker, "rust borrow checker", 3).unwrap();
        assert_eq!(first, second);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.score.to_bits(), b.score.to_bits());
        }
    }
}
