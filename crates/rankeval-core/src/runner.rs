//! Parallel evaluation of one ranker over a query set

use crate::error::{EvalError, Result};
use crate::evaluation::{AveragePrecisionRecord, EvaluationRun, Evaluator};
use crate::index::{Index, Judgments};
use crate::query::Query;
use crate::ranking::RankingFunction;
use crate::retriever::run_query;
use rankeval_config::{ApNormalization, Config};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Parameters of a single evaluation run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    /// Documents retrieved per query
    pub top_k: usize,
    /// Rank depth for average precision
    pub cutoff: usize,
    pub normalization: ApNormalization,
    /// Worker threads, 0 for the global rayon pool
    pub threads: usize,
}

impl RunSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            top_k: config.query_runner.top_k,
            cutoff: config.cutoff(),
            normalization: config.evaluation.normalization,
            threads: config.evaluation.threads,
        }
    }
}

impl Default for RunSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Retrieve and score every query with `ranker`
///
/// Queries run in parallel; the returned records are in the order of
/// `queries` regardless of completion order. The first failure aborts the
/// run, since a MAP over a partial query set would be misleading.
pub fn evaluate<R>(
    index: &dyn Index,
    judgments: &dyn Judgments,
    ranker: &R,
    queries: &[Query],
    settings: &RunSettings,
) -> Result<EvaluationRun>
where
    R: RankingFunction + ?Sized,
{
    if settings.top_k == 0 {
        return Err(EvalError::invalid_argument(
            "top_k",
            "must be a positive integer, got 0",
        ));
    }
    if settings.cutoff == 0 {
        return Err(EvalError::invalid_argument(
            "cutoff",
            "must be a positive integer, got 0",
        ));
    }

    let started = Instant::now();
    let evaluator = Evaluator::new(judgments, settings.cutoff, settings.normalization);

    let score_all = || -> Result<Vec<(usize, AveragePrecisionRecord)>> {
        queries
            .par_iter()
            .enumerate()
            .map(|(position, query)| {
                let ranked = run_query(index, ranker, &query.text, settings.top_k)?;
                if ranked.is_empty() && index.analyze(&query.text).is_empty() {
                    warn!(query_id = query.id, "query has no terms after analysis");
                }
                let record = evaluator.average_precision(query.id, &ranked);
                debug!(
                    ranker = ranker.name(),
                    query_id = query.id,
                    retrieved = ranked.len(),
                    average_precision = record.average_precision,
                    "scored query"
                );
                Ok((position, record))
            })
            .collect()
    };

    let mut scored = if settings.threads > 0 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(settings.threads)
            .build()
            .map_err(|e| EvalError::invalid_configuration("evaluation.threads", e.to_string()))?;
        pool.install(score_all)?
    } else {
        score_all()?
    };

    scored.sort_unstable_by_key(|(position, _)| *position);
    let run = EvaluationRun::new(
        ranker.name(),
        scored.into_iter().map(|(_, record)| record).collect(),
    );

    info!(
        ranker = ranker.name(),
        queries = run.len(),
        map = run.map().unwrap_or(0.0),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "evaluation finished"
    );

    Ok(run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{MemoryIndex, QrelsJudgments};
    use crate::query::parse_queries;
    use crate::ranking::{Bm25Ranker, InL2Ranker};

    fn fixture() -> (MemoryIndex, QrelsJudgments, Vec<Query>) {
        let index = MemoryIndex::from_documents([
            "supersonic flow over a flat plate",
            "heat transfer in laminar boundary layers",
            "boundary layer transition at supersonic speeds",
            "structural vibration of thin wings",
            "laminar flow heat transfer experiments",
        ]);
        let judgments = QrelsJudgments::parse(
            "0 0 1\n0 2 1\n1 1 1\n1 4 1\n2 3 1\n",
            std::path::Path::new("qrels"),
        )
        .unwrap();
        let queries = parse_queries(
            "supersonic flow\nlaminar heat transfer\nwing vibration\nunknown words only\n",
            0,
        );
        (index, judgments, queries)
    }

    #[test]
    fn test_records_follow_query_order() {
        let (index, judgments, queries) = fixture();
        let run = evaluate(
            &index,
            &judgments,
            &Bm25Ranker::default(),
            &queries,
            &RunSettings::default(),
        )
        .unwrap();

        let ids: Vec<u64> = run.records.iter().map(|r| r.query_id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(run.ranker, "bm25");
        // Query 3 has neither matching terms nor judgments
        assert_eq!(run.records[3].average_precision, 0.0);
        assert!(run.records[..3].iter().all(|r| r.average_precision > 0.0));
    }

    #[test]
    fn test_dedicated_pool_matches_global_pool() {
        let (index, judgments, queries) = fixture();
        let ranker = InL2Ranker::default();
        let global = evaluate(&index, &judgments, &ranker, &queries, &RunSettings::default())
            .unwrap();
        let pooled = evaluate(
            &index,
            &judgments,
            &ranker,
            &queries,
            &RunSettings {
                threads: 2,
                ..RunSettings::default()
            },
        )
        .unwrap();
        assert_eq!(global, pooled);
    }

    #[test]
    fn test_invalid_settings_fail_fast() {
        let (index, judgments, queries) = fixture();
        let settings = RunSettings {
            top_k: 0,
            ..RunSettings::default()
        };
        let err = evaluate(&index, &judgments, &Bm25Ranker::default(), &queries, &settings)
            .unwrap_err();
        assert!(matches!(err, EvalError::InvalidArgument { .. }));
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = Config::default();
        config.query_runner.top_k = 25;
        config.evaluation.threads = 4;
        let settings = RunSettings::from_config(&config);
        assert_eq!(settings.top_k, 25);
        assert_eq!(settings.cutoff, 25);
        assert_eq!(settings.threads, 4);
    }
}
