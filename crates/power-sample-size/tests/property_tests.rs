//! Property-based tests for the sample-size engine
//!
//! The forward (sample size) and inverse (power, MDE) directions must agree,
//! and every design adjustment must move the size in the expected direction.

use approx::assert_relative_eq;
use power_core::{ClusterParams, ExperimentDesign, Factor, MetricSpec, StatisticalParams};
use power_sample_size::adjusters::{design_effect, effective_multiplier, total_cells};
use power_sample_size::*;
use proptest::prelude::*;

fn metric_strategy() -> impl Strategy<Value = (MetricSpec, f64)> {
    prop_oneof![
        // binary: effect kept well inside [0, 1]
        (0.01f64..0.5, 0.02f64..0.5).prop_map(|(p, rel)| (MetricSpec::binary("conversion", p), p * rel)),
        (1.0f64..1000.0, 1.0f64..500.0, 0.01f64..0.5).prop_map(|(mean, sd, rel)| {
            (MetricSpec::continuous("revenue", mean).with_std_dev(sd), mean * rel)
        }),
        (0.1f64..50.0, 0.01f64..0.5).prop_map(|(lambda, rel)| (MetricSpec::count("events", lambda), lambda * rel)),
    ]
}

proptest! {
    // Property: sizing for a target power and re-evaluating gives that power back
    #[test]
    fn prop_power_round_trip(
        (metric, effect) in metric_strategy(),
        alpha in 0.001f64..0.2,
        power in 0.5f64..0.99
    ) {
        let n = sample_size_for_target_mde(&metric, alpha, power, effect).unwrap();
        let achieved = achieved_power(&metric, n, alpha, effect).unwrap();
        prop_assert!((achieved - power).abs() < 1e-3,
            "target power {power}, achieved {achieved} at n = {n}");
    }

    // Property: the MDE at the size computed for an effect is that effect
    #[test]
    fn prop_mde_inverse_law(
        (metric, effect) in metric_strategy(),
        alpha in 0.001f64..0.2,
        power in 0.5f64..0.99
    ) {
        let n = sample_size_for_target_mde(&metric, alpha, power, effect).unwrap();
        let mde = mde_analysis(&metric, n, alpha, power).unwrap();
        prop_assert!((mde.absolute - effect).abs() <= 1e-6 * effect,
            "effect {effect}, recovered {}", mde.absolute);
    }

    // Property: larger effects need fewer units
    #[test]
    fn prop_decreasing_in_effect(
        (metric, effect) in metric_strategy(),
        scale in 1.05f64..1.9
    ) {
        let n_small_effect = sample_size_for_target_mde(&metric, 0.05, 0.8, effect).unwrap();
        let n_large_effect = sample_size_for_target_mde(&metric, 0.05, 0.8, effect * scale).unwrap();
        prop_assert!(n_large_effect < n_small_effect);
    }

    // Property: more power and a stricter alpha both need more units
    #[test]
    fn prop_increasing_in_power_and_strictness(
        (metric, effect) in metric_strategy(),
        power in 0.5f64..0.9,
        alpha in 0.01f64..0.2
    ) {
        let base = sample_size_for_target_mde(&metric, alpha, power, effect).unwrap();
        let more_power = sample_size_for_target_mde(&metric, alpha, power + 0.05, effect).unwrap();
        let stricter = sample_size_for_target_mde(&metric, alpha / 2.0, power, effect).unwrap();
        prop_assert!(more_power > base);
        prop_assert!(stricter > base);
    }

    // Property: the design effect never shrinks the sample
    #[test]
    fn prop_design_effect_floor(icc in 0.0f64..=1.0, cluster_size in 1u32..500) {
        let deff = design_effect(icc, cluster_size);
        prop_assert!(deff >= 1.0);
        if icc > 0.0 && cluster_size > 1 {
            prop_assert!(deff > 1.0);
        } else {
            prop_assert_eq!(deff, 1.0);
        }
    }

    // Property: autocorrelation only ever inflates the switchback size
    #[test]
    fn prop_switchback_never_reduces(n in 1.0f64..1e6, rho in 0.0f64..0.99) {
        let adjusted = (n / effective_multiplier(rho)).ceil();
        prop_assert!(adjusted >= n);
        if rho == 0.0 {
            prop_assert_eq!(adjusted, n.ceil());
        }
    }

    // Property: cell count is the exact product of levels
    #[test]
    fn prop_factorial_cell_product(levels in prop::collection::vec(2u32..=10, 2..=5)) {
        let factors: Vec<Factor> = levels
            .iter()
            .enumerate()
            .map(|(i, &l)| Factor::new(format!("factor{i}"), l))
            .collect();
        let expected: u64 = levels.iter().map(|&l| l as u64).product();
        prop_assert_eq!(total_cells(&factors).unwrap(), expected);
    }
}

#[test]
fn test_cluster_scenario_totals() {
    let metric = MetricSpec::binary("conversion", 0.05);
    let params = StatisticalParams::default().with_relative_mde(10.0);

    let plain = calculate_sample_size(&ExperimentDesign::AbTest, &metric, &params).unwrap();
    let clustered = calculate_sample_size(
        &ExperimentDesign::Cluster(ClusterParams::new(0.05, 50)),
        &metric,
        &params,
    )
    .unwrap();

    assert_relative_eq!(clustered.design_effect().unwrap(), 3.45, epsilon = 1e-12);
    let ratio = clustered.sample_size_per_variant as f64 / plain.sample_size_per_variant as f64;
    assert_relative_eq!(ratio, 3.45, epsilon = 1e-3);
    assert_eq!(
        clustered.clusters_needed().unwrap(),
        2 * clustered.sample_size_per_variant.div_ceil(50)
    );
}

#[test]
fn test_switchback_inflates_calculated_size() {
    let metric = MetricSpec::count("orders", 5.0);
    let params = StatisticalParams::default().with_relative_mde(5.0);
    let mut previous = 0;
    for rho in [0.0, 0.2, 0.4, 0.6] {
        let design = ExperimentDesign::Switchback(power_core::SwitchbackParams::new(100, rho));
        let result = calculate_sample_size(&design, &metric, &params).unwrap();
        assert!(result.sample_size_per_variant > previous);
        previous = result.sample_size_per_variant;
    }
}
