//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{AnalyzeArgs, ConfigArgs, CrisesArgs, InteractiveArgs};

/// Tailrisk - Monte Carlo VaR, expected shortfall and crisis stress testing
#[derive(Parser)]
#[command(name = "tailrisk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Configuration file (.toml or .json)
    #[arg(short, long, env = "TAILRISK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Compute VaR and ES for a ticker, with optional stress test and backtest
    Analyze(AnalyzeArgs),

    /// List the crisis scenarios available for stress testing
    Crises(CrisesArgs),

    /// Answer questions one at a time, then run the analysis
    Interactive(InteractiveArgs),

    /// Inspect and validate configuration files
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
