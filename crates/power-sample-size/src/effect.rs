//! Effect-size resolution
//!
//! Converts a minimum detectable effect, given either as a percent of the
//! baseline or in the baseline's own unit, into an absolute effect size.

use power_core::MdeType;

/// Resolve an MDE into an absolute effect size
///
/// A relative MDE is a percent of the baseline, so `baseline = 0.05` with
/// `mde = 10` yields `0.005`. Zero or negative baselines are not rejected
/// here; the sample-size models report a zero effect as degenerate.
pub fn resolve_effect_size(baseline: f64, mde: f64, mde_type: MdeType) -> f64 {
    match mde_type {
        MdeType::Relative => baseline * (mde / 100.0),
        MdeType::Absolute => mde,
    }
}

/// Express an absolute effect as a percent of the baseline
///
/// Returns `None` when the baseline is zero and no relative effect exists.
pub fn relative_effect(baseline: f64, effect: f64) -> Option<f64> {
    if baseline == 0.0 || !baseline.is_finite() {
        None
    } else {
        Some(effect / baseline * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_relative_mde() {
        assert_relative_eq!(resolve_effect_size(0.05, 10.0, MdeType::Relative), 0.005);
        assert_relative_eq!(resolve_effect_size(50.0, 5.0, MdeType::Relative), 2.5);
    }

    #[test]
    fn test_absolute_mde_unchanged() {
        assert_eq!(resolve_effect_size(0.05, 0.01, MdeType::Absolute), 0.01);
        assert_eq!(resolve_effect_size(0.0, 3.0, MdeType::Absolute), 3.0);
    }

    #[test]
    fn test_zero_baseline_yields_zero_effect() {
        assert_eq!(resolve_effect_size(0.0, 10.0, MdeType::Relative), 0.0);
        assert!(resolve_effect_size(-2.0, 10.0, MdeType::Relative) < 0.0);
    }

    #[test]
    fn test_relative_effect() {
        assert_relative_eq!(relative_effect(0.05, 0.005).unwrap(), 10.0, epsilon = 1e-12);
        assert_eq!(relative_effect(0.0, 1.0), None);
    }
}
