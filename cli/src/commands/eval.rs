use anyhow::{Context, Result};
use rankeval_core::{evaluate, ranker_from_config, write_average_precisions, EvaluationRun, RunSettings};
use std::path::Path;
use std::time::Instant;

use super::context::RunContext;
use super::ui;
use super::CliRanker;

pub fn handle_eval(config_path: Option<&Path>, ranker: CliRanker) -> Result<()> {
    let ctx = RunContext::load(config_path)?;
    let started = Instant::now();

    let run = run_ranker(&ctx, ranker)?;

    ui::print_header(&format!("Average precision ({})", run.ranker));
    for (position, record) in run.records.iter().enumerate() {
        println!("{}", query_line(position, record.average_precision));
    }
    ui::print_metric("MAP", run.map()?);
    ui::print_metric("gMAP", run.gmap()?);

    write_run(&ctx, &run)?;
    ui::print_elapsed(started.elapsed().as_secs_f64());
    Ok(())
}

/// Queries are numbered from 1 in file order, independent of their ids
fn query_line(position: usize, average_precision: f64) -> String {
    format!(
        "Query {} average precision: {}",
        position + 1,
        average_precision
    )
}

pub(crate) fn run_ranker(ctx: &RunContext, ranker: CliRanker) -> Result<EvaluationRun> {
    let ranker = ranker_from_config(ranker.into(), &ctx.config)?;
    let settings = RunSettings::from_config(&ctx.config);
    let run = evaluate(
        &ctx.index,
        &ctx.judgments,
        ranker.as_ref(),
        &ctx.queries,
        &settings,
    )?;
    Ok(run)
}

/// Persist per-query AP when an output directory is configured
pub(crate) fn write_run(ctx: &RunContext, run: &EvaluationRun) -> Result<()> {
    if let Some(path) = ctx.config.output.average_precision_path(&run.ranker) {
        write_average_precisions(&path, run)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        ui::print_written(&path);
    }
    Ok(())
}
