//! Sample ratio mismatch detection
//!
//! Compares the observed units per variant with the intended allocation
//! using Pearson's chi-square goodness-of-fit test.

use power_core::{validate_allocation, Error, Result};
use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use tracing::debug;

/// p-value below which a split is reported as mismatched
pub const DEFAULT_SRM_THRESHOLD: f64 = 0.001;

/// Outcome of a sample ratio mismatch check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SrmCheck {
    pub chi_square: f64,
    pub degrees_of_freedom: usize,
    pub p_value: f64,
    /// Expected units per variant under the intended allocation
    pub expected: Vec<f64>,
    pub mismatch: bool,
}

/// Check observed counts against the allocation at the default threshold
pub fn check_sample_ratio(observed: &[u64], allocation: &[f64]) -> Result<SrmCheck> {
    check_sample_ratio_with_threshold(observed, allocation, DEFAULT_SRM_THRESHOLD)
}

/// Check observed counts against the allocation
pub fn check_sample_ratio_with_threshold(
    observed: &[u64],
    allocation: &[f64],
    threshold: f64,
) -> Result<SrmCheck> {
    power_core::normal::check_open_unit("threshold", threshold)?;
    if observed.len() < 2 || observed.len() != allocation.len() {
        return Err(Error::InvalidAllocation(format!(
            "{} observed counts for {} allocation entries",
            observed.len(),
            allocation.len()
        )));
    }
    validate_allocation(allocation, observed.len())?;

    let total: u64 = observed.iter().sum();
    if total == 0 {
        return Err(Error::ZeroTraffic("no units observed".to_string()));
    }

    let expected: Vec<f64> = allocation
        .iter()
        .map(|share| total as f64 * share / 100.0)
        .collect();
    let chi_square: f64 = observed
        .iter()
        .zip(&expected)
        .map(|(&o, &e)| {
            let diff = o as f64 - e;
            diff * diff / e
        })
        .sum();

    let degrees_of_freedom = observed.len() - 1;
    let distribution = ChiSquared::new(degrees_of_freedom as f64).map_err(|e| {
        Error::Computation(format!("Failed to create chi-squared distribution: {e}"))
    })?;
    let p_value = (1.0 - distribution.cdf(chi_square)).clamp(0.0, 1.0);
    debug!(chi_square, degrees_of_freedom, p_value, "sample ratio check");

    Ok(SrmCheck {
        chi_square,
        degrees_of_freedom,
        p_value,
        expected,
        mismatch: p_value < threshold,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_balanced_split_passes() {
        let check = check_sample_ratio(&[10_000, 10_000], &[50.0, 50.0]).unwrap();
        assert_eq!(check.chi_square, 0.0);
        assert_relative_eq!(check.p_value, 1.0);
        assert!(!check.mismatch);
    }

    #[test]
    fn test_small_noise_passes() {
        let check = check_sample_ratio(&[10_050, 9_950], &[50.0, 50.0]).unwrap();
        // (50² + 50²) / 10000
        assert_relative_eq!(check.chi_square, 0.5, epsilon = 1e-12);
        assert!(check.p_value > 0.4);
        assert!(!check.mismatch);
    }

    #[test]
    fn test_skewed_split_flags_mismatch() {
        let check = check_sample_ratio(&[10_500, 9_500], &[50.0, 50.0]).unwrap();
        assert_relative_eq!(check.chi_square, 50.0, epsilon = 1e-9);
        assert!(check.p_value < 1e-6);
        assert!(check.mismatch);
    }

    #[test]
    fn test_unequal_intended_split() {
        let check = check_sample_ratio(&[2_000, 8_000], &[20.0, 80.0]).unwrap();
        assert_eq!(check.expected, vec![2000.0, 8000.0]);
        assert!(!check.mismatch);
        assert_eq!(check.degrees_of_freedom, 1);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            check_sample_ratio(&[10, 10, 10], &[50.0, 50.0]),
            Err(Error::InvalidAllocation(_))
        ));
        assert!(matches!(
            check_sample_ratio(&[0, 0], &[50.0, 50.0]),
            Err(Error::ZeroTraffic(_))
        ));
        assert!(check_sample_ratio_with_threshold(&[5, 5], &[50.0, 50.0], 0.0).is_err());
    }
}
