//! CLI interface for cfgtrace

use cfgtrace::{Algorithm, ParseOptions};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cfgtrace")]
#[command(about = "Parse sentences with classical CFG strategies and print the derivation trace")]
#[command(version)]
pub struct Cli {
    /// Log parser activity to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse one sentence and print its trace
    Parse {
        /// Grammar file in `lhs --> sym, sym` format
        #[arg(short, long)]
        grammar: PathBuf,

        /// top-down, bottom-up, top-down-backtracking or bottom-up-backtracking
        #[arg(short, long)]
        algorithm: Algorithm,

        /// Start symbol
        #[arg(short, long)]
        start: Option<String>,

        #[command(flatten)]
        limits: LimitArgs,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,

        /// The sentence; words may be given as one argument or several
        #[arg(required = true)]
        sentence: Vec<String>,
    },

    /// Answer a JSON request `{"sentence", "grammar", "algorithm"}`
    Request {
        /// Request file (default: stdin)
        file: Option<PathBuf>,
    },

    /// Load a grammar and report problems
    Check {
        #[arg(short, long)]
        grammar: PathBuf,

        #[arg(short, long)]
        start: Option<String>,
    },

    /// Run every algorithm on one sentence and print one verdict per line
    Compare {
        #[arg(short, long)]
        grammar: PathBuf,

        #[arg(short, long)]
        start: Option<String>,

        #[command(flatten)]
        limits: LimitArgs,

        #[arg(required = true)]
        sentence: Vec<String>,
    },
}

/// Parser limits; unset flags keep the library defaults.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct LimitArgs {
    /// Step limit for the deterministic parsers
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Frame depth limit for the backtracking parsers
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Visited-state limit for the backtracking parsers
    #[arg(long)]
    pub max_work: Option<usize>,
}

impl LimitArgs {
    #[must_use]
    pub fn options(&self) -> ParseOptions {
        let defaults = ParseOptions::default();
        ParseOptions {
            max_steps: self.max_steps.unwrap_or(defaults.max_steps),
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            max_work: self.max_work.unwrap_or(defaults.max_work),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {s}. Supported: table, json")),
        }
    }
}
