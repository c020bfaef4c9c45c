//! Power curves for charting power against sample size

use power_core::{MetricSpec, Result};
use power_sample_size::achieved_power;
use serde::Serialize;

/// One point on a power curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerPoint {
    pub sample_size_per_variant: f64,
    pub power: f64,
}

/// Achieved power at each per-variant size
pub fn power_curve(
    metric: &MetricSpec,
    alpha: f64,
    effect: f64,
    sizes: &[f64],
) -> Result<Vec<PowerPoint>> {
    sizes
        .iter()
        .map(|&n| {
            Ok(PowerPoint {
                sample_size_per_variant: n,
                power: achieved_power(metric, n, alpha, effect)?,
            })
        })
        .collect()
}

/// `points` evenly spaced sizes from 10% to 200% of `target`
pub fn curve_sizes(target: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![target],
        _ => {
            let (lo, hi) = (0.1 * target, 2.0 * target);
            let step = (hi - lo) / (points - 1) as f64;
            (0..points).map(|i| lo + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_curve_is_monotone() {
        let metric = MetricSpec::continuous("revenue", 50.0).with_variance(2500.0);
        let curve = power_curve(&metric, 0.05, 2.5, &curve_sizes(6280.0, 20)).unwrap();
        assert_eq!(curve.len(), 20);
        assert!(curve.windows(2).all(|w| w[0].power < w[1].power));
        assert!(curve[0].power < 0.2);
        assert!(curve[19].power > 0.95);
    }

    #[test]
    fn test_curve_sizes() {
        let sizes = curve_sizes(1000.0, 3);
        assert_relative_eq!(sizes[0], 100.0);
        assert_relative_eq!(sizes[1], 1050.0);
        assert_relative_eq!(sizes[2], 2000.0);
        assert!(curve_sizes(1000.0, 0).is_empty());
        assert_eq!(curve_sizes(1000.0, 1), vec![1000.0]);
    }

    #[test]
    fn test_curve_propagates_errors() {
        let metric = MetricSpec::count("events", 2.0);
        assert!(power_curve(&metric, 0.05, 0.1, &[100.0, 0.0]).is_err());
    }
}
