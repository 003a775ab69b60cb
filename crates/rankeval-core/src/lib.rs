//! Ranking-function evaluation engine
//!
//! Scores queries against an inverted [`Index`](index::Index) with a pluggable
//! [`RankingFunction`](ranking::RankingFunction), measures average precision
//! against relevance [`Judgments`](index::Judgments), aggregates MAP and
//! compares two rankers with a paired t-test.

pub mod artifacts;
pub mod error;
pub mod evaluation;
pub mod index;
pub mod query;
pub mod ranking;
pub mod retriever;
pub mod runner;
pub mod score;

pub use artifacts::{write_average_precisions, write_p_value};
pub use error::{EvalError, Result};
pub use evaluation::metrics::{average_precision, mean_average_precision};
pub use evaluation::stats::{paired_ttest, TTestResult};
pub use evaluation::{AveragePrecisionRecord, EvaluationRun, Evaluator};
pub use index::{DocId, Index, Judgments, MemoryIndex, Posting, QrelsJudgments, QueryId};
pub use query::{load_queries, Query};
pub use ranking::{ranker_from_config, Bm25Ranker, InL2Ranker, RankerKind, RankingFunction};
pub use retriever::{run_query, RankedResult, ScoredDoc};
pub use runner::{evaluate, RunSettings};
pub use score::ScoreData;
