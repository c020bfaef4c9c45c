//! Traffic-allocation and variant-count adjustment
//!
//! Applied to the base per-variant size before any design adjuster.

use crate::result::Notes;
use power_core::StatisticalParams;
use tracing::debug;

/// Inflation for an unequal two-arm split, `(1 + r)² / 4r` with `r = treatment / control`
///
/// Equals 1 for an even split and grows symmetrically as the split skews.
pub fn unequal_allocation_factor(control: f64, treatment: f64) -> f64 {
    let r = treatment / control;
    (1.0 + r) * (1.0 + r) / (4.0 * r)
}

/// Apply the allocation and multi-variant inflation to a base per-variant size
///
/// Only the first two allocation entries are compared: the ratio of control
/// to the first treatment drives the inflation even with more variants.
/// `params` must already be validated.
pub fn adjust_for_allocation(n: f64, params: &StatisticalParams, notes: &mut Notes) -> f64 {
    let mut n = n;

    if let [control, treatment, ..] = params.traffic_allocation[..] {
        if control != treatment {
            let factor = unequal_allocation_factor(control, treatment);
            debug!(control, treatment, factor, "unequal allocation inflation");
            n *= factor;
            notes.assume(format!(
                "Unequal allocation {control}/{treatment}: sample size inflated by {factor:.3}"
            ));
        }
    }

    if params.variants > 2 {
        let comparisons = (params.variants - 1) as f64;
        n *= comparisons;
        notes.warn(format!(
            "{} variants compared against control: consider a multiple-comparison correction (e.g. Bonferroni)",
            params.variants
        ));
    }

    n
}
