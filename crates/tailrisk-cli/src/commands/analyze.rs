//! Analyze command implementation.
//!
//! Computes VaR and ES for a ticker, optionally under a crisis stress
//! scenario, and optionally backtests the VaR.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use tailrisk_config::AnalysisConfig;
use tailrisk_core::PriceSource;
use tailrisk_engine::{AnalysisReport, AnalysisRequest, RiskEngine, StressRequest};
use tailrisk_ext_file::CsvPriceSource;

use crate::cli::OutputFormat;
use crate::commands::{
    parse_asset_type, parse_crisis_selection, parse_date_range, validate_confidence,
};
use crate::output::print_report;

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Ticker symbol (e.g., AAPL, MSFT, CL=F)
    pub ticker: String,

    /// Start date (YYYY-MM-DD), inclusive
    #[arg(short, long)]
    pub start: String,

    /// End date (YYYY-MM-DD), exclusive
    #[arg(short, long)]
    pub end: String,

    /// Confidence level, e.g. 0.95
    #[arg(long)]
    pub confidence: Option<f64>,

    /// Number of Monte Carlo simulations
    #[arg(short = 'n', long)]
    pub simulations: Option<usize>,

    /// RNG seed for reproducible results
    #[arg(long)]
    pub seed: Option<u64>,

    /// Asset type for the stress test (stock, commodity, oil)
    #[arg(long)]
    pub stress: Option<String>,

    /// Crises to apply, by number or name (repeatable; "all" for every crisis)
    #[arg(long = "crisis", requires = "stress", num_args = 1..)]
    pub crises: Vec<String>,

    /// Number of periods over which each shock is applied
    #[arg(long, requires = "stress")]
    pub periods: Option<u32>,

    /// Backtest the VaR against realized returns
    #[arg(long, conflicts_with = "no_backtest")]
    pub backtest: bool,

    /// Skip the backtest even if the configuration enables it
    #[arg(long)]
    pub no_backtest: bool,

    /// Directory with <TICKER>.csv price files
    #[arg(long, env = "TAILRISK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Read prices from this CSV file instead of the data directory
    #[arg(long, conflicts_with = "data_dir")]
    pub prices: Option<PathBuf>,
}

/// Execute the analyze command.
pub fn execute(args: AnalyzeArgs, format: OutputFormat, config: &AnalysisConfig) -> Result<()> {
    let request = build_request(&args, config)?;

    let source = match (&args.prices, &args.data_dir) {
        (Some(file), _) => CsvPriceSource::from_file(file),
        (None, Some(dir)) => CsvPriceSource::new(dir),
        (None, None) => CsvPriceSource::new(&config.data_dir),
    };

    let report = run(source, config, &request)?;
    print_report(&report, format)
}

/// Runs a request against a source with the configured crisis table.
pub fn run<S: PriceSource>(
    source: S,
    config: &AnalysisConfig,
    request: &AnalysisRequest,
) -> Result<AnalysisReport> {
    let engine = RiskEngine::new(source).with_shock_table(config.shock_table());
    Ok(engine.run(request)?)
}

/// Merges command-line flags over configuration defaults.
fn build_request(args: &AnalyzeArgs, config: &AnalysisConfig) -> Result<AnalysisRequest> {
    let (start, end) = parse_date_range(&args.start, &args.end)?;

    let mut request = AnalysisRequest::from_config(&args.ticker, start, end, config)?;

    if let Some(c) = args.confidence {
        request = request.with_confidence_level(validate_confidence(c)?);
    }
    if let Some(n) = args.simulations {
        request = request.with_num_simulations(n);
    }
    if let Some(seed) = args.seed {
        request = request.with_seed(seed);
    }
    if args.backtest {
        request = request.with_backtest(true);
    }
    if args.no_backtest {
        request = request.with_backtest(false);
    }

    if let Some(asset) = &args.stress {
        let asset_type = parse_asset_type(asset)?;
        let crises = parse_crisis_selection(&args.crises)?;
        let periods = args.periods.unwrap_or(config.stress_periods);
        request = request.with_stress(StressRequest::new(asset_type, crises, periods));
    }

    Ok(request)
}
