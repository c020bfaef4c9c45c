//! Sample-size calculation
//!
//! Pipeline: resolve the effect, size it with the metric family's variance
//! model, apply the allocation inflation, then the one adjuster selected by
//! the design, and finally package and attach the general warnings.

use crate::adjusters::{
    adjust_causal, adjust_cluster, adjust_switchback, plan_bandit, plan_factorial,
};
use crate::allocation::adjust_for_allocation;
use crate::effect::resolve_effect_size;
use crate::family::{MetricFamily, MetricModel};
use crate::result::{ceil_count, DesignOutcome, Notes, SampleSizeResult};
use power_core::{
    CriticalValues, Error, ExperimentDesign, MdeType, MetricSpec, Result, StatisticalParams,
};
use tracing::{debug, instrument};

/// Per-variant size below which results are flagged as unreliable
pub const MIN_RELIABLE_SAMPLE_SIZE: u64 = 100;
/// Relative MDE (percent) below which the required samples get very large
pub const SMALL_RELATIVE_MDE: f64 = 1.0;
/// Conventional significance level
pub const CONVENTIONAL_ALPHA: f64 = 0.05;
/// Conventional power
pub const CONVENTIONAL_POWER: f64 = 0.8;

/// Compute the sample size a design needs to detect the configured MDE
///
/// Inputs are validated first; a malformed configuration is rejected
/// without producing a partial result.
#[instrument(skip_all, fields(design = %design, metric = %metric.metric_type))]
pub fn calculate_sample_size(
    design: &ExperimentDesign,
    metric: &MetricSpec,
    params: &StatisticalParams,
) -> Result<SampleSizeResult> {
    params.validate()?;
    design.validate()?;
    let z = CriticalValues::new(params.alpha, params.power)?;
    debug!(z_alpha = z.z_alpha, z_beta = z.z_beta, "critical values");

    let mut notes = Notes::default();
    notes.assume(format!(
        "Two-sided test at significance level α = {}",
        params.alpha
    ));
    notes.assume(format!("Target power {:.0}%", params.power * 100.0));

    let (n, outcome) = match design {
        ExperimentDesign::Mab(bandit) => return plan_bandit(bandit, params, notes),
        ExperimentDesign::Factorial(factorial) if !factorial.factors.is_empty() => {
            let n = fixed_sample_requirement(metric, params, &z, &mut notes)?;
            return plan_factorial(n, factorial, params, notes);
        }
        ExperimentDesign::Factorial(_) => {
            notes.assume("Factorial design without factors: sized as a plain comparison");
            let n = fixed_sample_requirement(metric, params, &z, &mut notes)?;
            (n, DesignOutcome::Standard)
        }
        ExperimentDesign::AbTest => {
            let n = fixed_sample_requirement(metric, params, &z, &mut notes)?;
            (n, DesignOutcome::Standard)
        }
        ExperimentDesign::Cluster(cluster) => {
            let n = fixed_sample_requirement(metric, params, &z, &mut notes)?;
            adjust_cluster(n, cluster, params.variants, &mut notes)?
        }
        ExperimentDesign::Switchback(switchback) => {
            let n = fixed_sample_requirement(metric, params, &z, &mut notes)?;
            adjust_switchback(n, switchback, &mut notes)?
        }
        ExperimentDesign::CausalInference(causal) => {
            let n = fixed_sample_requirement(metric, params, &z, &mut notes)?;
            adjust_causal(n, causal, &mut notes)?
        }
    };

    package(n, outcome, params, notes)
}

/// Base per-variant size after allocation and variant-count inflation
fn fixed_sample_requirement(
    metric: &MetricSpec,
    params: &StatisticalParams,
    z: &CriticalValues,
    notes: &mut Notes,
) -> Result<f64> {
    let effect = resolve_effect_size(metric.baseline, params.mde, params.mde_type);
    if effect == 0.0 {
        return Err(Error::degenerate(&format!("metric '{}'", metric.name)));
    }
    let model = MetricModel::for_metric(metric)?;
    let base = model.sample_size(z, effect)?;
    debug!(effect, base, "base per-variant sample size");

    notes.assume(match params.mde_type {
        MdeType::Relative => format!(
            "Minimum detectable effect {}% of baseline {} (absolute {effect:.6})",
            params.mde, metric.baseline
        ),
        MdeType::Absolute => format!(
            "Minimum detectable effect {effect:.6} on baseline {}",
            metric.baseline
        ),
    });
    notes.assume(model.describe(effect));

    Ok(adjust_for_allocation(base, params, notes))
}

/// Round, total and attach the warnings every fixed-sample design carries
fn package(
    n: f64,
    outcome: DesignOutcome,
    params: &StatisticalParams,
    mut notes: Notes,
) -> Result<SampleSizeResult> {
    let per_variant = ceil_count(n, "sample size per variant")?;
    let total = per_variant
        .checked_mul(params.variants as u64)
        .ok_or_else(|| Error::non_finite("total sample size"))?;

    if per_variant < MIN_RELIABLE_SAMPLE_SIZE {
        notes.warn(format!(
            "Sample size of {per_variant} per variant is below {MIN_RELIABLE_SAMPLE_SIZE}: normal approximation may be unreliable"
        ));
    }
    if params.mde_type == MdeType::Relative && params.mde.abs() < SMALL_RELATIVE_MDE {
        notes.warn(format!(
            "Relative MDE of {}% is below {SMALL_RELATIVE_MDE}% and requires very large samples",
            params.mde
        ));
    }
    if params.alpha > CONVENTIONAL_ALPHA {
        notes.warn(format!(
            "Significance level α = {} exceeds {CONVENTIONAL_ALPHA}: elevated false-positive risk",
            params.alpha
        ));
    }
    if params.power < CONVENTIONAL_POWER {
        notes.warn(format!(
            "Power of {:.0}% is below {:.0}%: elevated false-negative risk",
            params.power * 100.0,
            CONVENTIONAL_POWER * 100.0
        ));
    }

    debug!(per_variant, total, "packaged sample size");
    Ok(SampleSizeResult::new(
        per_variant,
        total,
        params.power,
        params.mde,
        notes,
        outcome,
    ))
}
