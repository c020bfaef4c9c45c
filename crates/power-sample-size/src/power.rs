//! Power analysis: achieved power for a fixed sample size

use crate::effect::resolve_effect_size;
use crate::family::{MetricFamily, MetricModel};
use power_core::normal::{normal_cdf, z_alpha};
use power_core::{MetricSpec, Result, StatisticalParams};
use serde::Serialize;
use tracing::{debug, instrument};

/// Achieved power and the quantities it was derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerAnalysis {
    pub sample_size_per_variant: f64,
    /// Absolute effect assumed to be true
    pub effect: f64,
    pub standard_error: f64,
    /// effect / SE
    pub noncentrality: f64,
    pub power: f64,
}

/// Power of a two-sided test with `n` units per variant against `effect`
///
/// Uses the same standard errors as the sample-size models, so feeding the
/// size computed for a target power back in returns that power.
#[instrument(skip(metric), fields(metric = %metric.metric_type))]
pub fn power_analysis(
    metric: &MetricSpec,
    n_per_variant: f64,
    alpha: f64,
    effect: f64,
) -> Result<PowerAnalysis> {
    let z_alpha = z_alpha(alpha)?;
    let model = MetricModel::for_metric(metric)?;
    let standard_error = model.standard_error(n_per_variant, effect)?;
    let noncentrality = effect.abs() / standard_error;
    let power = (1.0 - normal_cdf(z_alpha - noncentrality)?).clamp(0.0, 1.0);
    debug!(standard_error, noncentrality, power, "achieved power");

    Ok(PowerAnalysis {
        sample_size_per_variant: n_per_variant,
        effect,
        standard_error,
        noncentrality,
        power,
    })
}

/// Achieved power as a bare probability
pub fn achieved_power(
    metric: &MetricSpec,
    n_per_variant: f64,
    alpha: f64,
    effect: f64,
) -> Result<f64> {
    Ok(power_analysis(metric, n_per_variant, alpha, effect)?.power)
}

/// Achieved power for the effect implied by `params.mde`
pub fn power_for_params(
    metric: &MetricSpec,
    params: &StatisticalParams,
    n_per_variant: f64,
) -> Result<PowerAnalysis> {
    let effect = resolve_effect_size(metric.baseline, params.mde, params.mde_type);
    power_analysis(metric, n_per_variant, params.alpha, effect)
}
