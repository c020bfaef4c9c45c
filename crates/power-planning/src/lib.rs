//! Experiment planning on top of the sample-size engine
//!
//! - [`estimate_duration`]: days and weeks to reach a total sample size
//! - [`check_sample_ratio`]: chi-square test for a sample ratio mismatch
//!   while the experiment runs
//! - [`power_curve`]: achieved power across a range of sample sizes
//! - [`ExperimentConfig`] and [`plan`]: one JSON snapshot in, sample size
//!   and duration out
//!
//! # Example
//!
//! ```rust
//! use power_planning::{plan, ExperimentConfig};
//!
//! let config = ExperimentConfig::from_json_str(r#"{
//!     "design": {"type": "AB_TEST"},
//!     "metric": {"name": "revenue", "type": "CONTINUOUS", "baseline": 50, "variance": 2500},
//!     "params": {
//!         "alpha": 0.05, "power": 0.8, "mde": 5, "mdeType": "relative",
//!         "trafficAllocation": [50, 50], "variants": 2
//!     },
//!     "traffic": {"dailyTraffic": 2000}
//! }"#).unwrap();
//!
//! let plan = plan(&config).unwrap();
//! assert_eq!(plan.sample_size.sample_size_per_variant, 6280);
//! assert_eq!(plan.duration.unwrap().days, 7);
//! ```

mod config;
mod curve;
mod duration;
mod plan;
mod srm;

pub use config::ExperimentConfig;
pub use curve::{curve_sizes, power_curve, PowerPoint};
pub use duration::{
    estimate_duration, DurationEstimate, TrafficParams, MAX_RECOMMENDED_DAYS,
    MIN_RECOMMENDED_DAYS,
};
pub use plan::{plan, ExperimentPlan};
pub use srm::{
    check_sample_ratio, check_sample_ratio_with_threshold, SrmCheck, DEFAULT_SRM_THRESHOLD,
};
