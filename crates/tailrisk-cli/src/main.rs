//! Tailrisk CLI - Monte Carlo VaR, expected shortfall and stress testing.
//!
//! # Usage
//!
//! ```bash
//! # VaR and ES at 95% from data/SPY.csv
//! tailrisk analyze SPY --start 2023-01-01 --end 2024-01-01
//!
//! # Stress with the 2008 and Dot-com crises spread over 3 days, then backtest
//! tailrisk analyze CL=F --start 2023-01-01 --end 2024-01-01 \
//!     --stress oil --crisis 1 3 --periods 3 --backtest
//!
//! # List the crises for an asset type
//! tailrisk crises --asset-type oil
//!
//! # Answer the questions one by one
//! tailrisk interactive
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::load_config;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // stdout carries the report
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let format = cli.format;
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Config(args) => commands::config::execute(args, format, config_path)?,
        Commands::Analyze(args) => {
            commands::analyze::execute(args, format, &load_config(config_path)?)?
        }
        Commands::Crises(args) => {
            commands::crises::execute(args, format, &load_config(config_path)?)?
        }
        Commands::Interactive(args) => {
            commands::interactive::execute(args, format, &load_config(config_path)?)?
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        output::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
