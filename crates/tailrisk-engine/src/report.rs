//! Analysis results.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tailrisk_risk::stress::SelectedShocks;
use tailrisk_risk::{BacktestReport, ESResult, VaRResult};

/// VaR and ES for one price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Number of returns the metrics were estimated from.
    pub observations: usize,
    /// Monte Carlo VaR.
    pub var: VaRResult,
    /// Expected shortfall, `None` when no return lies beyond the VaR.
    pub expected_shortfall: Option<ESResult>,
    /// Why the shortfall is missing, when it is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortfall_note: Option<String>,
}

impl RiskMetrics {
    /// The ES value, if defined.
    pub fn es_value(&self) -> Option<f64> {
        self.expected_shortfall.as_ref().map(|es| es.expected_shortfall)
    }
}

/// Metrics of the stressed series together with the scenario that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressedMetrics {
    /// Crises applied, in order.
    pub shocks: SelectedShocks,
    /// Periods each shock was spread over.
    pub periods: u32,
    /// Overall multiplier applied to every price.
    pub cumulative_factor: f64,
    /// Last price after the shocks.
    pub stressed_last_price: f64,
    /// VaR and ES of the stressed series.
    pub metrics: RiskMetrics,
}

/// Full result of an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Instrument ticker.
    pub ticker: String,
    /// Source the prices came from.
    pub source: String,
    /// Date of the first observation used.
    pub first_date: NaiveDate,
    /// Date of the last observation used.
    pub last_date: NaiveDate,
    /// Number of price observations.
    pub price_count: usize,
    /// Last observed price.
    pub last_price: f64,
    /// Seed used for the simulation, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Metrics on the observed prices.
    pub baseline: RiskMetrics,
    /// Metrics under the stress scenario, when one was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stressed: Option<StressedMetrics>,
    /// Backtest of the baseline VaR, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backtest: Option<BacktestReport>,
}
