//! Minimum detectable effect for a fixed sample size, and its inverse

use crate::effect::relative_effect;
use crate::family::{MetricFamily, MetricModel};
use power_core::{CriticalValues, Error, MetricSpec, Result};
use serde::Serialize;
use tracing::{debug, instrument};

const MAX_ITERATIONS: usize = 200;
const TOLERANCE: f64 = 1e-12;

/// Smallest effect detectable at the target power
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MdeEstimate {
    /// In the baseline's unit
    pub absolute: f64,
    /// Percent of the baseline, absent for a zero baseline
    pub relative: Option<f64>,
}

/// Minimum detectable effect with `n` units per variant
///
/// `mde = (zα + zβ) × SE(n)`. For binary metrics the pooled variance depends
/// on the effect itself, so the equation is solved by fixed-point iteration
/// starting from the no-effect variance; the map is a contraction over the
/// admissible proportions. An increase is solved for first; when it cannot
/// fit below a proportion of 1 the decrease is solved instead. The estimate
/// is always reported as a magnitude.
#[instrument(skip(metric), fields(metric = %metric.metric_type))]
pub fn mde_analysis(
    metric: &MetricSpec,
    n_per_variant: f64,
    alpha: f64,
    power: f64,
) -> Result<MdeEstimate> {
    let z = CriticalValues::new(alpha, power)?;
    let multiplier = z.z_alpha + z.z_beta;
    let model = MetricModel::for_metric(metric)?;

    let mde = match model {
        MetricModel::Binary(_) => solve_binary(&model, n_per_variant, multiplier, 1.0)
            .or_else(|upward| {
                debug!(error = %upward, "increase infeasible, solving for a decrease");
                solve_binary(&model, n_per_variant, multiplier, -1.0).map_err(|_| upward)
            })?,
        _ => multiplier * model.standard_error(n_per_variant, 0.0)?,
    };

    debug!(mde, "minimum detectable effect");
    Ok(MdeEstimate {
        absolute: mde,
        relative: relative_effect(metric.baseline, mde),
    })
}

/// Fixed point of `mde = multiplier × SE(n, sign × mde)`
fn solve_binary(model: &MetricModel, n: f64, multiplier: f64, sign: f64) -> Result<f64> {
    let mut mde = multiplier * model.standard_error(n, 0.0)?;
    for iteration in 0..MAX_ITERATIONS {
        let next = multiplier * model.standard_error(n, sign * mde)?;
        let delta = (next - mde).abs();
        mde = next;
        if delta <= TOLERANCE * mde.max(TOLERANCE) {
            debug!(iteration, sign, mde, "binary MDE converged");
            return Ok(mde);
        }
    }
    Err(Error::Computation(
        "binary MDE iteration did not converge".to_string(),
    ))
}

/// Real-valued per-variant sample size that detects an absolute `effect`
///
/// This is the base two-sample requirement before allocation or design
/// adjustments, the exact inverse of [`mde_analysis`].
pub fn sample_size_for_target_mde(
    metric: &MetricSpec,
    alpha: f64,
    power: f64,
    effect: f64,
) -> Result<f64> {
    let z = CriticalValues::new(alpha, power)?;
    MetricModel::for_metric(metric)?.sample_size(&z, effect)
}
