pub mod compare;
pub mod context;
pub mod eval;
pub mod search;
pub mod ui;

pub use compare::handle_compare;
pub use eval::handle_eval;
pub use search::handle_search;

use clap::{Parser, Subcommand, ValueEnum};
use rankeval_core::RankerKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rankeval")]
#[command(about = "Evaluate and compare retrieval ranking functions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Log every query
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one ranker over the query set and report MAP
    Eval {
        #[arg(long, value_enum, default_value_t = CliRanker::Bm25)]
        ranker: CliRanker,
    },
    /// Evaluate two rankers and test whether their MAPs differ
    Compare {
        #[arg(long, value_enum)]
        baseline: CliRanker,

        #[arg(long, value_enum)]
        candidate: CliRanker,
    },
    /// Rank documents for a single query
    Search {
        /// The query string
        query: String,

        #[arg(long, value_enum, default_value_t = CliRanker::Bm25)]
        ranker: CliRanker,

        /// Number of results, defaults to the configured top-k
        #[arg(long)]
        top: Option<usize>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CliRanker {
    Inl2,
    Bm25,
}

impl From<CliRanker> for RankerKind {
    fn from(ranker: CliRanker) -> Self {
        match ranker {
            CliRanker::Inl2 => RankerKind::InL2,
            CliRanker::Bm25 => RankerKind::Bm25,
        }
    }
}
