//! Cluster-randomized designs

use crate::result::{ceil_count, DesignOutcome, Notes};
use power_core::{ClusterParams, Result};
use tracing::debug;

/// Clusters per arm below which inference is unreliable
pub const MIN_CLUSTERS_PER_ARM: u64 = 10;

/// Design effect `1 + (m - 1) × ICC`
pub fn design_effect(icc: f64, cluster_size: u32) -> f64 {
    1.0 + (cluster_size as f64 - 1.0) * icc
}

/// Inflate `n` by the design effect and count the clusters it takes
///
/// Without both `icc` and `cluster_size` the size passes through unchanged.
pub fn adjust_cluster(
    n: f64,
    params: &ClusterParams,
    variants: u32,
    notes: &mut Notes,
) -> Result<(f64, DesignOutcome)> {
    let (Some(icc), Some(cluster_size)) = (params.icc, params.cluster_size) else {
        notes.assume("Cluster design without ICC and cluster size: no design effect applied");
        return Ok((n, DesignOutcome::Standard));
    };

    let deff = design_effect(icc, cluster_size);
    let adjusted = ceil_count(n * deff, "cluster-adjusted sample size")?;
    let clusters_per_arm = adjusted.div_ceil(cluster_size as u64);
    debug!(deff, adjusted, clusters_per_arm, "cluster design effect");

    notes.assume(format!(
        "Cluster randomization: ICC = {icc}, {cluster_size} units per cluster, design effect = {deff:.3}"
    ));
    if clusters_per_arm < MIN_CLUSTERS_PER_ARM {
        notes.warn(format!(
            "Only {clusters_per_arm} clusters per arm: fewer than {MIN_CLUSTERS_PER_ARM} clusters compromises the reliability of inference"
        ));
    }

    Ok((
        adjusted as f64,
        DesignOutcome::Cluster {
            design_effect: deff,
            clusters_per_arm,
            clusters_needed: clusters_per_arm * variants as u64,
        },
    ))
}
