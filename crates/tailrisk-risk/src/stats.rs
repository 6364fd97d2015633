//! Sample statistics shared by the estimators.

use statrs::statistics::Statistics;

/// Arithmetic mean. NaN for an empty sample.
pub(crate) fn mean(values: &[f64]) -> f64 {
    values.mean()
}

/// Population standard deviation (divides by `n`). NaN for an empty sample.
pub(crate) fn population_std_dev(values: &[f64]) -> f64 {
    values.population_std_dev()
}

/// Percentile with linear interpolation between order statistics.
///
/// `q` is a fraction in `[0, 1]`. The rank is `q * (n - 1)`, and values
/// between two ranks are interpolated linearly.
pub(crate) fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let w = rank - lo as f64;
        sorted[lo] + w * (sorted[hi] - sorted[lo])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_population_std_dev() {
        // mean 5, squared deviations sum to 32, n = 8
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&values), 5.0, epsilon = 1e-12);
        assert_relative_eq!(population_std_dev(&values), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_interpolates() {
        let values = [4.0, 1.0, 3.0, 2.0, 5.0];
        assert_relative_eq!(percentile(&values, 0.0), 1.0);
        assert_relative_eq!(percentile(&values, 1.0), 5.0);
        assert_relative_eq!(percentile(&values, 0.5), 3.0);
        // rank 0.2 between 1.0 and 2.0
        assert_relative_eq!(percentile(&values, 0.05), 1.2, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_single_value() {
        assert_eq!(percentile(&[0.3], 0.05), 0.3);
        assert!(percentile(&[], 0.05).is_nan());
    }
}
