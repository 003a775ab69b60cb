use anyhow::{Context, Result};
use rankeval_core::write_p_value;
use std::path::Path;
use std::time::Instant;

use super::context::RunContext;
use super::eval::{run_ranker, write_run};
use super::ui;
use super::CliRanker;

pub fn handle_compare(
    config_path: Option<&Path>,
    baseline: CliRanker,
    candidate: CliRanker,
) -> Result<()> {
    let ctx = RunContext::load(config_path)?;
    let started = Instant::now();

    let baseline_run = run_ranker(&ctx, baseline)?;
    let candidate_run = run_ranker(&ctx, candidate)?;
    let result = baseline_run.compare(&candidate_run)?;

    ui::print_header(&format!(
        "{} vs {} over {} queries",
        baseline_run.ranker,
        candidate_run.ranker,
        baseline_run.len()
    ));
    ui::print_metric(&format!("{} MAP", baseline_run.ranker), baseline_run.map()?);
    ui::print_metric(&format!("{} MAP", candidate_run.ranker), candidate_run.map()?);
    println!("{}", result.format());

    let alpha = ctx.config.evaluation.alpha;
    if result.is_significant(alpha) {
        println!("Difference is significant at alpha = {}", alpha);
    } else {
        println!("Difference is not significant at alpha = {}", alpha);
    }

    write_run(&ctx, &baseline_run)?;
    if candidate_run.ranker != baseline_run.ranker {
        write_run(&ctx, &candidate_run)?;
    }
    if let Some(path) = ctx.config.output.significance_path() {
        write_p_value(&path, result.p_value)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        ui::print_written(&path);
    }

    ui::print_elapsed(started.elapsed().as_secs_f64());
    Ok(())
}
