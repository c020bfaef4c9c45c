//! Shape of the JSON handed to document export

use approx::assert_abs_diff_eq;
use power_core::{ClusterParams, ExperimentDesign, MetricSpec, StatisticalParams, SwitchbackParams};
use power_planning::{plan, ExperimentConfig, TrafficParams};
use serde_json::Value;

fn export(config: &ExperimentConfig) -> Value {
    let json = plan(config).unwrap().to_json_pretty().unwrap();
    serde_json::from_str(&json).unwrap()
}

#[test]
fn test_cluster_plan_export() {
    let config = ExperimentConfig::new(
        ExperimentDesign::Cluster(ClusterParams::new(0.05, 50)),
        MetricSpec::binary("conversion", 0.05),
        StatisticalParams::default().with_relative_mde(10.0),
    )
    .with_traffic(TrafficParams::new(50_000.0));

    let value = export(&config);
    assert_eq!(value["design"], "CLUSTER");
    let sample_size = &value["sampleSize"];
    assert_eq!(sample_size["sampleSizePerVariant"], 107_760);
    assert_eq!(sample_size["design"]["kind"], "cluster");
    assert_abs_diff_eq!(
        sample_size["design"]["designEffect"].as_f64().unwrap(),
        3.45,
        epsilon = 1e-12
    );
    assert_eq!(sample_size["design"]["clustersNeeded"], 4312);
    // ceil(215520 / 50000)
    assert_eq!(value["duration"]["days"], 5);
    assert!(sample_size["assumptions"].as_array().unwrap().len() >= 4);
}

#[test]
fn test_switchback_export_carries_warning() {
    let config = ExperimentConfig::new(
        ExperimentDesign::Switchback(SwitchbackParams::new(30, 0.25)),
        MetricSpec::count("orders", 8.0),
        StatisticalParams::default(),
    );
    let value = export(&config);
    let sample_size = &value["sampleSize"];
    assert_eq!(sample_size["design"]["kind"], "switchback");
    // floor(30 × 0.6)
    assert_eq!(sample_size["design"]["effectivePeriods"], 18);
    assert!(sample_size["warnings"][0]
        .as_str()
        .unwrap()
        .contains("carryover"));
    assert!(value.get("duration").is_none());
}
