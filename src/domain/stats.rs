use crate::domain::errors::AnalysisError;
use crate::domain::types::PriceStatistics;
use statrs::statistics::{Data, Distribution};

/// Shared statistics utilities for series calculations.
pub struct Stats;

impl Stats {
    /// Descriptive statistics over a value series: mean, median, sample
    /// standard deviation (n-1), min, max and quartiles.
    pub fn describe(values: &[f64]) -> Result<PriceStatistics, AnalysisError> {
        if values.is_empty() {
            return Err(AnalysisError::InsufficientData { need: 1, got: 0 });
        }

        // Mean and std dev via statrs (f64 boundary for statistical library)
        let data = Data::new(values.to_vec());
        let mean = data.mean().unwrap_or(0.0);
        let std = if values.len() < 2 {
            0.0
        } else {
            data.std_dev().unwrap_or(0.0)
        };

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        Ok(PriceStatistics {
            mean,
            median: Self::quantile_sorted(&sorted, 0.5),
            std,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            q1: Self::quantile_sorted(&sorted, 0.25),
            q3: Self::quantile_sorted(&sorted, 0.75),
        })
    }

    /// Linear-interpolation quantile over an ascending-sorted slice.
    ///
    /// tau in [0, 1]; tau positions between order statistics interpolate
    /// linearly. A single-element slice returns that element for any tau.
    pub fn quantile_sorted(sorted: &[f64], tau: f64) -> f64 {
        debug_assert!(!sorted.is_empty());
        debug_assert!((0.0..=1.0).contains(&tau));

        if sorted.len() == 1 {
            return sorted[0];
        }

        let pos = tau * (sorted.len() - 1) as f64;
        let lo = pos.floor() as usize;
        let hi = pos.ceil() as usize;
        if lo == hi {
            return sorted[lo];
        }
        let frac = pos - lo as f64;
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }

    /// Arithmetic mean, 0.0 for an empty slice.
    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Rounds to the given number of decimal places.
    pub fn round_dp(value: f64, places: u32) -> f64 {
        let factor = 10f64.powi(places as i32);
        (value * factor).round() / factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "expected {b}, got {a}");
    }

    #[test]
    fn test_describe_known_series() {
        // mean 5, sample std sqrt(32/7)
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = Stats::describe(&values).unwrap();

        assert_close(stats.mean, 5.0);
        assert_close(stats.std, (32.0f64 / 7.0).sqrt());
        assert_close(stats.min, 2.0);
        assert_close(stats.max, 9.0);
        assert_close(stats.median, 4.5);
    }

    #[test]
    fn test_quartiles_interpolate_linearly() {
        let sorted = vec![1.0, 2.0, 3.0, 4.0];
        assert_close(Stats::quantile_sorted(&sorted, 0.25), 1.75);
        assert_close(Stats::quantile_sorted(&sorted, 0.5), 2.5);
        assert_close(Stats::quantile_sorted(&sorted, 0.75), 3.25);
        assert_close(Stats::quantile_sorted(&sorted, 0.0), 1.0);
        assert_close(Stats::quantile_sorted(&sorted, 1.0), 4.0);
    }

    #[test]
    fn test_describe_single_sample() {
        let stats = Stats::describe(&[42.5]).unwrap();
        assert_close(stats.mean, 42.5);
        assert_close(stats.median, 42.5);
        assert_close(stats.q1, 42.5);
        assert_close(stats.q3, 42.5);
        assert_close(stats.std, 0.0);
    }

    #[test]
    fn test_describe_empty_is_error() {
        let err = Stats::describe(&[]).unwrap_err();
        assert!(matches!(
            err,
            crate::domain::errors::AnalysisError::InsufficientData { .. }
        ));
    }

    #[test]
    fn test_round_dp() {
        assert_close(Stats::round_dp(350.456, 2), 350.46);
        assert_close(Stats::round_dp(-0.1235, 3), -0.124);
        assert_close(Stats::round_dp(12000.04, 1), 12000.0);
    }
}
