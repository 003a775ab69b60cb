mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{handle_compare, handle_eval, handle_search, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Eval { ranker } => {
            handle_eval(config_path, ranker)?;
        }
        Commands::Compare {
            baseline,
            candidate,
        } => {
            handle_compare(config_path, baseline, candidate)?;
        }
        Commands::Search { query, ranker, top } => {
            handle_search(config_path, &query, ranker, top)?;
        }
    }

    Ok(())
}
