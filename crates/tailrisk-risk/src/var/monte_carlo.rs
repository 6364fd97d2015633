//! Monte Carlo VaR under a fitted normal distribution.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use super::{NormalFit, VaRResult};
use crate::stats::{mean, percentile, population_std_dev};
use tailrisk_core::{ConfidenceLevel, ReturnSeries, RiskError, RiskResult};

/// Upper bound on Monte Carlo draws for a single run.
pub const MAX_SIMULATIONS: usize = 10_000_000;

/// Fits a normal distribution to a return series.
///
/// Uses the sample mean and the population (uncorrected) standard deviation.
///
/// # Errors
///
/// Returns `RiskError::InsufficientData` if `returns` is empty.
pub fn fit_normal(returns: &ReturnSeries) -> RiskResult<NormalFit> {
    if returns.is_empty() {
        return Err(RiskError::insufficient_data("fit_normal", 1, 0));
    }

    Ok(NormalFit {
        mean: mean(returns.as_slice()),
        std_dev: population_std_dev(returns.as_slice()),
    })
}

/// Draws `num_simulations` returns from the normal fitted to `returns`.
///
/// # Errors
///
/// Returns `RiskError::InsufficientData` for an empty series and
/// `RiskError::InvalidParameter` when `num_simulations` is zero or above
/// [`MAX_SIMULATIONS`].
pub fn simulate_returns<R: Rng + ?Sized>(
    returns: &ReturnSeries,
    num_simulations: usize,
    rng: &mut R,
) -> RiskResult<(NormalFit, Vec<f64>)> {
    if num_simulations == 0 || num_simulations > MAX_SIMULATIONS {
        return Err(RiskError::invalid_parameter(
            "num_simulations",
            format!("{num_simulations} is outside 1..={MAX_SIMULATIONS}"),
        ));
    }

    let fit = fit_normal(returns)?;
    let normal = Normal::new(fit.mean, fit.std_dev).map_err(|e| {
        RiskError::calculation_failed(
            "simulate_returns",
            format!(
                "cannot build Normal({}, {}): {e}",
                fit.mean, fit.std_dev
            ),
        )
    })?;

    let draws = (0..num_simulations).map(|_| normal.sample(rng)).collect();
    Ok((fit, draws))
}

/// Estimates VaR by Monte Carlo simulation.
///
/// Fits `Normal(mean, population std)` to `returns`, draws
/// `num_simulations` samples using `rng`, and returns the negated
/// `(1 - c) * 100`-th percentile of the draws.
///
/// Results are reproducible when `rng` is seeded. Small simulation counts at
/// extreme confidence levels give noisy estimates; raise `num_simulations`
/// for stability.
///
/// # Errors
///
/// Same as [`simulate_returns`].
///
/// # Example
///
/// ```rust
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use tailrisk_core::{ConfidenceLevel, ReturnSeries};
/// use tailrisk_risk::simulate_var;
///
/// let returns = ReturnSeries::new(vec![-0.02, 0.01, -0.005, 0.015, 0.0, -0.01]);
/// let mut rng = StdRng::seed_from_u64(7);
/// let var = simulate_var(&returns, ConfidenceLevel::P95, 10_000, &mut rng).unwrap();
/// assert!(var.var > 0.0);
/// ```
pub fn simulate_var<R: Rng + ?Sized>(
    returns: &ReturnSeries,
    confidence_level: ConfidenceLevel,
    num_simulations: usize,
    rng: &mut R,
) -> RiskResult<VaRResult> {
    let (fit, draws) = simulate_returns(returns, num_simulations, rng)?;
    let tail_quantile = percentile(&draws, confidence_level.tail_probability());

    Ok(VaRResult {
        var: -tail_quantile,
        confidence_level,
        num_simulations,
        fit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_returns() -> ReturnSeries {
        ReturnSeries::new(vec![
            -0.021, 0.013, -0.004, 0.008, 0.017, -0.012, 0.002, -0.009, 0.011, -0.015, 0.006,
            0.001, -0.003, 0.014, -0.018, 0.009,
        ])
    }

    #[test]
    fn test_fit_normal_uses_population_std() {
        let returns = ReturnSeries::new(vec![0.01, -0.01]);
        let fit = fit_normal(&returns).unwrap();
        assert_relative_eq!(fit.mean, 0.0, epsilon = 1e-15);
        // sample std would be sqrt(2) * 0.01
        assert_relative_eq!(fit.std_dev, 0.01, epsilon = 1e-15);
    }

    #[test]
    fn test_empty_returns_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = simulate_var(&ReturnSeries::default(), ConfidenceLevel::P95, 100, &mut rng)
            .unwrap_err();
        assert!(matches!(err, RiskError::InsufficientData { .. }));
    }

    #[test]
    fn test_zero_simulations_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = simulate_var(&sample_returns(), ConfidenceLevel::P95, 0, &mut rng).unwrap_err();
        assert!(matches!(err, RiskError::InvalidParameter { ref parameter, .. } if parameter == "num_simulations"));
    }

    #[test]
    fn test_simulation_count_is_bounded() {
        let mut rng = StdRng::seed_from_u64(1);
        for n in [MAX_SIMULATIONS + 1, usize::MAX] {
            let err = simulate_var(&sample_returns(), ConfidenceLevel::P95, n, &mut rng).unwrap_err();
            assert!(matches!(err, RiskError::InvalidParameter { ref parameter, .. } if parameter == "num_simulations"));
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let returns = sample_returns();
        let a = simulate_var(&returns, ConfidenceLevel::P95, 5_000, &mut StdRng::seed_from_u64(42))
            .unwrap();
        let b = simulate_var(&returns, ConfidenceLevel::P95, 5_000, &mut StdRng::seed_from_u64(42))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_converges_to_normal_quantile() {
        let returns = sample_returns();
        let fit = fit_normal(&returns).unwrap();
        let mut rng = StdRng::seed_from_u64(2024);
        let var = simulate_var(&returns, ConfidenceLevel::P95, 200_000, &mut rng).unwrap();

        // z(0.05) = -1.644854
        let analytic = -(fit.mean - 1.644_854 * fit.std_dev);
        assert_relative_eq!(var.var, analytic, max_relative = 0.02);
        assert!(!var.is_gain());
    }

    #[test]
    fn test_higher_confidence_gives_larger_var() {
        let returns = sample_returns();
        let var_95 =
            simulate_var(&returns, ConfidenceLevel::P95, 50_000, &mut StdRng::seed_from_u64(9))
                .unwrap();
        let var_99 =
            simulate_var(&returns, ConfidenceLevel::P99, 50_000, &mut StdRng::seed_from_u64(9))
                .unwrap();
        assert!(var_99.var > var_95.var);
    }

    #[test]
    fn test_strong_positive_drift_gives_negative_var() {
        let returns = ReturnSeries::new(vec![0.049, 0.050, 0.051, 0.050]);
        let mut rng = StdRng::seed_from_u64(3);
        let var = simulate_var(&returns, ConfidenceLevel::P95, 10_000, &mut rng).unwrap();

        assert!(var.var < 0.0);
        assert!(var.is_gain());
        assert!(var.threshold() > 0.0);
    }

    #[test]
    fn test_constant_returns_give_degenerate_var() {
        let returns = ReturnSeries::new(vec![-0.01, -0.01, -0.01]);
        let mut rng = StdRng::seed_from_u64(5);
        let var = simulate_var(&returns, ConfidenceLevel::P99, 1_000, &mut rng).unwrap();
        assert_relative_eq!(var.var, 0.01, epsilon = 1e-15);
        assert_eq!(var.fit.std_dev, 0.0);
    }

    #[test]
    fn test_single_simulation() {
        let mut rng = StdRng::seed_from_u64(11);
        let (_, draws) = simulate_returns(&sample_returns(), 1, &mut rng).unwrap();
        assert_eq!(draws.len(), 1);

        let mut rng = StdRng::seed_from_u64(11);
        let var = simulate_var(&sample_returns(), ConfidenceLevel::P95, 1, &mut rng).unwrap();
        assert_eq!(var.var, -draws[0]);
    }
}
