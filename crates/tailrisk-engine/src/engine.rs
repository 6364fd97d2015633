//! The analysis runner.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use tailrisk_core::{ConfidenceLevel, PriceSeries, PriceSource};
use tailrisk_risk::stress::{apply_stress, cumulative_factor, ShockTable};
use tailrisk_risk::{backtest, compute_returns, expected_shortfall, simulate_var};

use crate::error::{EngineError, EngineResult};
use crate::report::{AnalysisReport, RiskMetrics, StressedMetrics};
use crate::request::AnalysisRequest;

/// Runs analyses against a price source.
///
/// A run fetches the price window, computes the baseline VaR and ES, then
/// optionally a stressed VaR and ES and a backtest of the baseline VaR.
/// The baseline and then the stressed simulation draw from the same
/// generator, so a seeded run is fully reproducible.
#[derive(Debug, Clone)]
pub struct RiskEngine<S> {
    source: S,
    shock_table: ShockTable,
}

impl<S: PriceSource> RiskEngine<S> {
    /// Create an engine with the standard crisis table.
    pub fn new(source: S) -> Self {
        Self {
            source,
            shock_table: ShockTable::standard(),
        }
    }

    /// Replace the crisis table.
    #[must_use]
    pub fn with_shock_table(mut self, shock_table: ShockTable) -> Self {
        self.shock_table = shock_table;
        self
    }

    /// Run an analysis, seeding the generator from the request.
    ///
    /// Without a seed the generator is seeded from OS entropy.
    pub fn run(&self, request: &AnalysisRequest) -> EngineResult<AnalysisReport> {
        let mut rng = match request.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run_with_rng(request, &mut rng)
    }

    /// Run an analysis with a caller-supplied generator.
    ///
    /// # Errors
    ///
    /// Fails on an invalid request, a source error, an empty price window
    /// (`EngineError::NoData`) and any risk error other than an undefined
    /// expected shortfall, which is recorded in the report instead.
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        request: &AnalysisRequest,
        rng: &mut R,
    ) -> EngineResult<AnalysisReport> {
        request.validate()?;

        info!(
            ticker = %request.ticker,
            start = %request.start,
            end = %request.end,
            source = self.source.name(),
            "Fetching price history"
        );
        let prices = self
            .source
            .fetch(&request.ticker, request.start, request.end)?
            .ok_or_else(|| EngineError::NoData {
                ticker: request.ticker.clone(),
                start: request.start,
                end: request.end,
            })?;
        debug!(observations = prices.len(), "Price history loaded");

        let baseline = metrics_for(
            &prices,
            request.confidence_level,
            request.num_simulations,
            rng,
        )?;
        info!(
            var = baseline.var.var,
            es = ?baseline.es_value(),
            confidence = %request.confidence_level,
            "Baseline risk computed"
        );

        let stressed = match &request.stress {
            Some(stress) => {
                let shocks = stress.crises.resolve(&self.shock_table, stress.asset_type)?;
                for crisis in shocks.iter() {
                    info!(
                        crisis = %crisis.name,
                        shock_pct = crisis.shock_percent(),
                        asset_type = %stress.asset_type,
                        periods = stress.periods,
                        "Applying crisis shock"
                    );
                }

                let factor = cumulative_factor(&shocks, stress.periods)?;
                let stressed_prices = apply_stress(&prices, &shocks, stress.periods)?;
                let metrics = metrics_for(
                    &stressed_prices,
                    request.confidence_level,
                    request.num_simulations,
                    rng,
                )?;
                info!(var = metrics.var.var, es = ?metrics.es_value(), "Stressed risk computed");

                Some(StressedMetrics {
                    stressed_last_price: stressed_prices.last().price,
                    shocks,
                    periods: stress.periods,
                    cumulative_factor: factor,
                    metrics,
                })
            }
            None => None,
        };

        let backtest = if request.backtest {
            let report = backtest(&prices, baseline.var.var, request.confidence_level)?;
            if report.exceeds_expected {
                warn!(
                    violations = report.violation_count,
                    expected = report.expected_violation_count,
                    "VaR exceeded more often than expected"
                );
            }
            Some(report)
        } else {
            None
        };

        Ok(AnalysisReport {
            ticker: request.ticker.clone(),
            source: self.source.name().to_string(),
            first_date: prices.first().date,
            last_date: prices.last().date,
            price_count: prices.len(),
            last_price: prices.last().price,
            seed: request.seed,
            baseline,
            stressed,
            backtest,
        })
    }
}

/// VaR and ES of a price series. An undefined ES is recorded, not raised.
fn metrics_for<R: Rng + ?Sized>(
    prices: &PriceSeries,
    confidence_level: ConfidenceLevel,
    num_simulations: usize,
    rng: &mut R,
) -> EngineResult<RiskMetrics> {
    let returns = compute_returns(prices)?;
    let var = simulate_var(&returns, confidence_level, num_simulations, rng)?;
    if var.is_gain() {
        warn!(var = var.var, "VaR is negative; the loss quantile is a gain");
    }

    let (expected_shortfall, shortfall_note) = match expected_shortfall(&returns, var.var) {
        Ok(es) => (Some(es), None),
        Err(e) if e.is_undefined_shortfall() => {
            warn!(var = var.var, "No return beyond the VaR; expected shortfall undefined");
            (None, Some(e.to_string()))
        }
        Err(e) => return Err(e.into()),
    };

    Ok(RiskMetrics {
        observations: returns.len(),
        var,
        expected_shortfall,
        shortfall_note,
    })
}
