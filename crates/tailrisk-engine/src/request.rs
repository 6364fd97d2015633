//! Analysis requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tailrisk_config::AnalysisConfig;
use tailrisk_core::{AssetType, ConfidenceLevel, RiskResult};
use tailrisk_risk::stress::{SelectedShocks, ShockTable, MAX_STRESS_PERIODS};
use tailrisk_risk::MAX_SIMULATIONS;

use crate::error::{EngineError, EngineResult};

/// How the crises of a stress run are chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrisisSelection {
    /// By crisis name.
    Names(Vec<String>),
    /// By 1-based position in the asset type's crisis list.
    Positions(Vec<usize>),
    /// Every crisis listed for the asset type.
    All,
}

impl CrisisSelection {
    /// Resolves the selection against a shock table.
    ///
    /// A crisis picked more than once is applied once, at its first position.
    pub fn resolve(&self, table: &ShockTable, asset_type: AssetType) -> RiskResult<SelectedShocks> {
        match self {
            Self::Names(names) => table.select(asset_type, &dedup(names)),
            Self::Positions(positions) => table.select_by_position(asset_type, &dedup(positions)),
            Self::All => {
                let count = table.crises(asset_type)?.len();
                let all: Vec<usize> = (1..=count).collect();
                table.select_by_position(asset_type, &all)
            }
        }
    }
}

fn dedup<T: PartialEq + Clone>(items: &[T]) -> Vec<T> {
    let mut unique: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(item) {
            unique.push(item.clone());
        }
    }
    unique
}

/// Stress scenario for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressRequest {
    /// Asset type whose crisis list is used.
    pub asset_type: AssetType,
    /// Crises to apply.
    pub crises: CrisisSelection,
    /// Number of periods each shock is spread over.
    pub periods: u32,
}

impl StressRequest {
    /// Creates a stress request.
    pub fn new(asset_type: AssetType, crises: CrisisSelection, periods: u32) -> Self {
        Self {
            asset_type,
            crises,
            periods,
        }
    }
}

/// Everything needed for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Instrument ticker.
    pub ticker: String,
    /// First date of the price window (inclusive).
    pub start: NaiveDate,
    /// End of the price window (exclusive).
    pub end: NaiveDate,
    /// VaR and ES confidence level.
    pub confidence_level: ConfidenceLevel,
    /// Monte Carlo draw count.
    pub num_simulations: usize,
    /// RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Optional stress scenario.
    pub stress: Option<StressRequest>,
    /// Whether to backtest the baseline VaR.
    pub backtest: bool,
}

impl AnalysisRequest {
    /// Creates a request with the default parameters: 95% confidence, 10 000
    /// simulations, no stress, no backtest.
    pub fn new(ticker: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            ticker: ticker.into(),
            start,
            end,
            confidence_level: ConfidenceLevel::P95,
            num_simulations: 10_000,
            seed: None,
            stress: None,
            backtest: false,
        }
    }

    /// Creates a request taking its parameters from a configuration.
    ///
    /// The configuration's stress periods are not applied here since a
    /// request has no stress scenario until one is attached.
    pub fn from_config(
        ticker: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        config: &AnalysisConfig,
    ) -> EngineResult<Self> {
        Ok(Self {
            confidence_level: config.confidence()?,
            num_simulations: config.num_simulations,
            seed: config.seed,
            backtest: config.backtest,
            ..Self::new(ticker, start, end)
        })
    }

    /// Sets the confidence level.
    #[must_use]
    pub fn with_confidence_level(mut self, confidence_level: ConfidenceLevel) -> Self {
        self.confidence_level = confidence_level;
        self
    }

    /// Sets the simulation count.
    #[must_use]
    pub fn with_num_simulations(mut self, num_simulations: usize) -> Self {
        self.num_simulations = num_simulations;
        self
    }

    /// Sets the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Attaches a stress scenario.
    #[must_use]
    pub fn with_stress(mut self, stress: StressRequest) -> Self {
        self.stress = Some(stress);
        self
    }

    /// Enables or disables the backtest.
    #[must_use]
    pub fn with_backtest(mut self, backtest: bool) -> Self {
        self.backtest = backtest;
        self
    }

    /// Checks the request before any data is fetched.
    pub fn validate(&self) -> EngineResult<()> {
        if self.ticker.trim().is_empty() {
            return Err(EngineError::invalid_request("ticker cannot be empty"));
        }
        if self.start >= self.end {
            return Err(EngineError::invalid_request(format!(
                "start date {} must be before end date {}",
                self.start, self.end
            )));
        }
        if self.num_simulations == 0 || self.num_simulations > MAX_SIMULATIONS {
            return Err(EngineError::invalid_request(format!(
                "number of simulations must be between 1 and {MAX_SIMULATIONS}, got {}",
                self.num_simulations
            )));
        }
        if let Some(stress) = &self.stress {
            if stress.periods == 0 || stress.periods > MAX_STRESS_PERIODS {
                return Err(EngineError::invalid_request(format!(
                    "stress periods must be between 1 and {MAX_STRESS_PERIODS}, got {}",
                    stress.periods
                )));
            }
        }
        Ok(())
    }
}
