//! Switchback designs
//!
//! Adjacent periods are autocorrelated, so fewer independent observations
//! exist than periods were run.

use crate::result::{ceil_count, DesignOutcome, Notes};
use power_core::{Result, SwitchbackParams};
use tracing::debug;

const CARRYOVER_WARNING: &str =
    "Switchback model assumes no carryover effect between adjacent periods";

/// Share of observations that remain effectively independent, `(1 - ρ) / (1 + ρ)`
pub fn effective_multiplier(autocorrelation: f64) -> f64 {
    (1.0 - autocorrelation) / (1.0 + autocorrelation)
}

/// Discount `n` for autocorrelation between periods
///
/// Without both `num_periods` and `autocorrelation` the size passes through.
pub fn adjust_switchback(
    n: f64,
    params: &SwitchbackParams,
    notes: &mut Notes,
) -> Result<(f64, DesignOutcome)> {
    let outcome = match (params.num_periods, params.autocorrelation) {
        (Some(num_periods), Some(rho)) => {
            let multiplier = effective_multiplier(rho);
            let adjusted = ceil_count(n / multiplier, "switchback-adjusted sample size")?;
            let effective_periods = ((num_periods as f64 * multiplier).floor() as u64).max(1);
            debug!(rho, multiplier, adjusted, effective_periods, "switchback discount");

            notes.assume(format!(
                "Switchback over {num_periods} periods with autocorrelation ρ = {rho}: {effective_periods} effective periods"
            ));
            if let Some(hours) = params.period_length {
                notes.assume(format!("Period length {hours} hours"));
            }
            Some((adjusted as f64, multiplier, effective_periods))
        }
        _ => {
            notes.assume("Switchback without period count and autocorrelation: no discount applied");
            None
        }
    };
    notes.warn(CARRYOVER_WARNING);

    Ok(match outcome {
        Some((adjusted, effective_multiplier, effective_periods)) => (
            adjusted,
            DesignOutcome::Switchback {
                effective_multiplier,
                effective_periods,
            },
        ),
        None => (n, DesignOutcome::Standard),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_effective_multiplier() {
        assert_eq!(effective_multiplier(0.0), 1.0);
        assert_relative_eq!(effective_multiplier(0.5), 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_adjust_switchback() {
        let mut notes = Notes::default();
        let (n, outcome) =
            adjust_switchback(1000.0, &SwitchbackParams::new(24, 0.5), &mut notes).unwrap();
        assert_eq!(n, 3000.0);
        match outcome {
            DesignOutcome::Switchback {
                effective_periods, ..
            } => assert_eq!(effective_periods, 8),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(notes.warnings, vec![CARRYOVER_WARNING.to_string()]);
    }

    #[test]
    fn test_zero_autocorrelation_keeps_size() {
        let mut notes = Notes::default();
        let (n, _) =
            adjust_switchback(1000.4, &SwitchbackParams::new(10, 0.0), &mut notes).unwrap();
        assert_eq!(n, 1001.0);
    }

    #[test]
    fn test_effective_periods_floor_of_one() {
        let mut notes = Notes::default();
        let (_, outcome) =
            adjust_switchback(10.0, &SwitchbackParams::new(2, 0.9), &mut notes).unwrap();
        assert!(matches!(
            outcome,
            DesignOutcome::Switchback {
                effective_periods: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_parameters_still_warn() {
        let mut notes = Notes::default();
        let (n, outcome) =
            adjust_switchback(500.0, &SwitchbackParams::default(), &mut notes).unwrap();
        assert_eq!(n, 500.0);
        assert_eq!(outcome, DesignOutcome::Standard);
        assert_eq!(notes.warnings.len(), 1);
    }
}
