//! Interactive command implementation.
//!
//! Asks for the run parameters one question at a time, re-asking until each
//! answer is valid, then prints the report.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

use tailrisk_config::{AnalysisConfig, MAX_SIMULATIONS, MAX_STRESS_PERIODS};
use tailrisk_core::{AssetType, PriceSource};
use tailrisk_engine::{AnalysisRequest, StressRequest};
use tailrisk_ext_file::CsvPriceSource;

use crate::cli::OutputFormat;
use crate::commands::{
    analyze, parse_asset_type, parse_confidence, parse_count, parse_crisis_selection,
    parse_date, parse_yes_no, split_selection,
};
use crate::error::{CliError, CliResult};
use crate::output::print_report;

/// Arguments for the interactive command.
#[derive(Args, Debug)]
pub struct InteractiveArgs {
    /// Directory with <TICKER>.csv price files
    #[arg(long, env = "TAILRISK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// RNG seed for reproducible results
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Question-and-answer session over any line-based input.
pub struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes a line to the session output.
    pub fn say(&mut self, message: impl AsRef<str>) -> CliResult<()> {
        writeln!(self.output, "{}", message.as_ref())?;
        Ok(())
    }

    /// Asks until `parse` accepts the answer.
    pub fn ask<T>(&mut self, prompt: &str, parse: impl Fn(&str) -> CliResult<T>) -> CliResult<T> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(CliError::InputClosed);
            }

            match parse(line.trim()) {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    /// Asks a question whose empty answer means `default`.
    fn ask_or<T: Clone>(
        &mut self,
        prompt: &str,
        default: T,
        parse: impl Fn(&str) -> CliResult<T>,
    ) -> CliResult<T> {
        self.ask(prompt, |s| {
            if s.is_empty() {
                Ok(default.clone())
            } else {
                parse(s)
            }
        })
    }

    /// Runs the question sequence.
    ///
    /// Returns `None` when the source has no prices for the chosen ticker
    /// and dates.
    pub fn collect_request<S: PriceSource>(
        &mut self,
        source: &S,
        config: &AnalysisConfig,
        seed: Option<u64>,
    ) -> Result<Option<AnalysisRequest>> {
        self.say("Welcome to the Tailrisk VaR calculator.")?;

        let ticker = self.ask(
            "Enter the ticker symbol (e.g., AAPL, MSFT, CL=F for crude oil): ",
            parse_ticker,
        )?;
        let start = self.ask("Enter the start date (YYYY-MM-DD): ", parse_date)?;
        let end = self.ask("Enter the end date (YYYY-MM-DD): ", |s| {
            parse_end_date(s, start)
        })?;

        self.say(format!("Fetching data for {ticker} from {start} to {end}..."))?;
        if source.fetch(&ticker, start, end)?.is_none() {
            self.say("No data found. Please check your ticker and date range.")?;
            return Ok(None);
        }

        let mut request = AnalysisRequest::from_config(&ticker, start, end, config)?;
        if let Some(seed) = seed {
            request = request.with_seed(seed);
        }

        let confidence = self.ask_or(
            &format!(
                "Enter confidence level (e.g., 0.95 for 95%) [{}]: ",
                request.confidence_level.value()
            ),
            request.confidence_level,
            parse_confidence,
        )?;
        let simulations = self.ask_or(
            &format!(
                "Enter the number of simulations for Monte Carlo [{}]: ",
                request.num_simulations
            ),
            request.num_simulations,
            |s| parse_count(s, "number of simulations", MAX_SIMULATIONS),
        )?;
        request = request
            .with_confidence_level(confidence)
            .with_num_simulations(simulations);

        let stress = self.ask(
            "Do you want to apply stress tests (top 5 financial crises)? (yes/no): ",
            parse_yes_no,
        )?;
        if stress {
            request = request.with_stress(self.collect_stress(config)?);
        }

        let backtest = self.ask(
            "Do you want to run backtesting on the VaR model? (yes/no): ",
            parse_yes_no,
        )?;
        Ok(Some(request.with_backtest(backtest)))
    }

    fn collect_stress(&mut self, config: &AnalysisConfig) -> Result<StressRequest> {
        let table = config.shock_table();
        let choices = table
            .asset_types()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let asset_type = self.ask(
            &format!("Enter the type of asset ({choices}): "),
            |s| {
                let asset: AssetType = parse_asset_type(s)?;
                table
                    .crises(asset)
                    .map(|_| asset)
                    .map_err(|_| CliError::InvalidAssetType(s.to_string()))
            },
        )?;

        self.say("\nAvailable crises:")?;
        for (idx, crisis) in table.crises(asset_type)?.iter().enumerate() {
            self.say(format!("{}. {}", idx + 1, crisis.name))?;
        }

        let crises = self.ask(
            "\nEnter the number of crises you want to apply (e.g., 1 3 for 2008 and Dot-com): ",
            |s| {
                let selection = parse_crisis_selection(&split_selection(s))?;
                selection
                    .resolve(&table, asset_type)
                    .map_err(|e| CliError::InvalidCrisisSelection(e.to_string()))?;
                Ok(selection)
            },
        )?;

        let periods = self.ask_or(
            &format!(
                "Enter the number of periods over which to apply the stress (e.g., 3 for 3 days) [{}]: ",
                config.stress_periods
            ),
            config.stress_periods,
            |s| parse_count(s, "number of periods", MAX_STRESS_PERIODS),
        )?;

        Ok(StressRequest::new(asset_type, crises, periods))
    }
}

fn parse_ticker(s: &str) -> CliResult<String> {
    if s.is_empty() || s.chars().any(char::is_whitespace) {
        return Err(CliError::InvalidTicker(s.to_string()));
    }
    Ok(s.to_string())
}

fn parse_end_date(s: &str, start: NaiveDate) -> CliResult<NaiveDate> {
    let end = parse_date(s)?;
    if end <= start {
        return Err(CliError::InvalidDateRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(end)
}

/// Execute the interactive command.
pub fn execute(args: InteractiveArgs, format: OutputFormat, config: &AnalysisConfig) -> Result<()> {
    let source = CsvPriceSource::new(args.data_dir.as_ref().unwrap_or(&config.data_dir));

    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout());
    let Some(request) = session.collect_request(&source, config, args.seed)? else {
        return Ok(());
    };

    let report = analyze::run(&source, config, &request)?;
    print_report(&report, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tailrisk_core::{ConfidenceLevel, PriceSeries};
    use tailrisk_engine::CrisisSelection;
    use tailrisk_ext_file::InMemoryPriceSource;

    fn source() -> InMemoryPriceSource {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let prices = PriceSeries::from_prices(start, &[100.0, 99.0, 101.0, 98.0]).unwrap();
        InMemoryPriceSource::new().with_series("SPY", prices)
    }

    fn session(input: &str) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
        Session::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_full_session() {
        let mut s = session("SPY\n2024-01-01\n2024-02-01\n0.99\n500\nyes\noil\n1 3\n3\nyes\n");
        let request = s
            .collect_request(&source(), &AnalysisConfig::default(), Some(4))
            .unwrap()
            .unwrap();

        assert_eq!(request.ticker, "SPY");
        assert_eq!(request.confidence_level, ConfidenceLevel::P99);
        assert_eq!(request.num_simulations, 500);
        assert_eq!(request.seed, Some(4));
        assert!(request.backtest);

        let stress = request.stress.unwrap();
        assert_eq!(stress.asset_type, AssetType::Oil);
        assert_eq!(stress.crises, CrisisSelection::Positions(vec![1, 3]));
        assert_eq!(stress.periods, 3);

        let transcript = String::from_utf8(s.output).unwrap();
        assert!(transcript.contains("1. 2008 Financial Crisis"));
        assert!(transcript.contains("5. Asian Financial Crisis 1997"));
    }

    #[test]
    fn test_invalid_answers_are_asked_again() {
        let mut s = session(
            "SPY\nyesterday\n2024-01-01\n2023-01-01\n2024-02-01\n1.5\n0.95\nlots\n99999999999\n100\nmaybe\nno\nno\n",
        );
        let request = s
            .collect_request(&source(), &AnalysisConfig::default(), None)
            .unwrap()
            .unwrap();

        assert_eq!(request.confidence_level, ConfidenceLevel::P95);
        assert_eq!(request.num_simulations, 100);
        assert!(request.stress.is_none());
        assert!(!request.backtest);

        let transcript = String::from_utf8(s.output).unwrap();
        assert!(transcript.contains("Invalid date format: yesterday"));
        assert!(transcript.contains("Invalid confidence level: 1.5"));
        assert!(transcript.contains("Invalid number of simulations: 99999999999"));
        assert!(transcript.contains("Please answer yes or no"));
    }

    #[test]
    fn test_empty_answers_take_config_defaults() {
        let config = AnalysisConfig::default()
            .with_num_simulations(321)
            .with_stress_periods(7);
        let mut s = session("SPY\n2024-01-01\n2024-02-01\n\n\ny\nstock\n9\n2\n\nn\n");
        let request = s.collect_request(&source(), &config, None).unwrap().unwrap();

        assert_eq!(request.num_simulations, 321);
        let stress = request.stress.unwrap();
        // position 9 is out of range and was asked again
        assert_eq!(stress.crises, CrisisSelection::Positions(vec![2]));
        assert_eq!(stress.periods, 7);
    }

    #[test]
    fn test_no_data_ends_session() {
        let mut s = session("QQQ\n2024-01-01\n2024-02-01\n");
        let result = s
            .collect_request(&source(), &AnalysisConfig::default(), None)
            .unwrap();
        assert!(result.is_none());
        let transcript = String::from_utf8(s.output).unwrap();
        assert!(transcript.contains("No data found"));
    }

    #[test]
    fn test_closed_input() {
        let mut s = session("SPY\n");
        let err = s
            .collect_request(&source(), &AnalysisConfig::default(), None)
            .unwrap_err();
        assert!(err.to_string().contains("Input closed"));
    }
}
