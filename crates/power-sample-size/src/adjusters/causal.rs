//! Causal-inference designs
//!
//! Only difference-in-differences changes the number; the other methods
//! attach the caveats that decide whether the figure can be trusted.

use crate::result::{ceil_count, DesignOutcome, Notes};
use power_core::{CausalMethod, CausalParams, Result};
use tracing::debug;

/// First-stage F below which an instrument is conventionally weak
pub const WEAK_INSTRUMENT_F: f64 = 10.0;

/// AR(1) variance inflation `(1 + ρ) / (1 - ρ)`
pub fn serial_correlation_inflation(rho: f64) -> f64 {
    (1.0 + rho) / (1.0 - rho)
}

/// Apply the method-specific correction and notes
pub fn adjust_causal(
    n: f64,
    params: &CausalParams,
    notes: &mut Notes,
) -> Result<(f64, DesignOutcome)> {
    let mut method_notes = Vec::new();
    let mut n = n;

    match params.method {
        CausalMethod::Did { serial_correlation } => {
            if let Some(rho) = serial_correlation.filter(|&rho| rho > 0.0) {
                let inflation = serial_correlation_inflation(rho);
                n = ceil_count(n * inflation, "serial-correlation adjusted sample size")? as f64;
                debug!(rho, inflation, n, "difference-in-differences inflation");
                method_notes.push(format!(
                    "Serial correlation ρ = {rho}: sample size inflated by {inflation:.3} (AR(1) approximation)"
                ));
            }
            method_notes.push(
                "Difference-in-differences assumes parallel trends between groups absent treatment"
                    .to_string(),
            );
        }
        CausalMethod::Rdd { bandwidth } => {
            method_notes.push(
                "Effective sample size depends on the number of units within the bandwidth around the cutoff"
                    .to_string(),
            );
            if let Some(h) = bandwidth {
                method_notes.push(format!("Bandwidth h = {h}"));
            }
            notes.warn("Regression discontinuity sample size is approximate");
        }
        CausalMethod::Psm { caliper } => {
            if let Some(c) = caliper {
                method_notes.push(format!("Matching caliper {c} standard deviations"));
            }
            notes.warn("Propensity score matching requires overlap in covariate distributions between groups");
        }
        CausalMethod::Iv { first_stage_f } => {
            notes.warn("Instrumental variable reliability depends on instrument strength (first-stage F-statistic)");
            if let Some(f) = first_stage_f {
                method_notes.push(format!("First-stage F = {f}"));
                if f < WEAK_INSTRUMENT_F {
                    notes.warn(format!(
                        "First-stage F = {f} is below {WEAK_INSTRUMENT_F}: weak instrument, estimates will be biased"
                    ));
                }
            }
        }
    }

    notes.assume(format!("Causal inference method: {}", params.method.name()));
    Ok((
        n,
        DesignOutcome::Causal {
            method: params.method.name(),
            method_notes,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(method: CausalMethod, n: f64) -> (f64, DesignOutcome, Notes) {
        let mut notes = Notes::default();
        let (n, outcome) = adjust_causal(n, &CausalParams::new(method), &mut notes).unwrap();
        (n, outcome, notes)
    }

    #[test]
    fn test_did_inflation() {
        let (n, outcome, _) = run(
            CausalMethod::Did {
                serial_correlation: Some(0.5),
            },
            1000.0,
        );
        assert_eq!(n, 3000.0);
        match outcome {
            DesignOutcome::Causal {
                method,
                method_notes,
            } => {
                assert_eq!(method, "did");
                assert_eq!(method_notes.len(), 2);
                assert!(method_notes[1].contains("parallel trends"));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_did_without_correlation_unchanged() {
        let (n, _, _) = run(
            CausalMethod::Did {
                serial_correlation: None,
            },
            1000.5,
        );
        assert_eq!(n, 1000.5);
        let (n, _, _) = run(
            CausalMethod::Did {
                serial_correlation: Some(0.0),
            },
            1000.5,
        );
        assert_eq!(n, 1000.5);
    }

    #[test]
    fn test_other_methods_leave_size() {
        for method in [
            CausalMethod::Rdd { bandwidth: Some(2.0) },
            CausalMethod::Psm { caliper: None },
            CausalMethod::Iv {
                first_stage_f: Some(30.0),
            },
        ] {
            let (n, _, notes) = run(method, 800.0);
            assert_eq!(n, 800.0);
            assert_eq!(notes.warnings.len(), 1);
        }
    }

    #[test]
    fn test_weak_instrument_warning() {
        let (_, _, notes) = run(
            CausalMethod::Iv {
                first_stage_f: Some(4.0),
            },
            800.0,
        );
        assert_eq!(notes.warnings.len(), 2);
        assert!(notes.warnings[1].contains("weak instrument"));
    }
}
