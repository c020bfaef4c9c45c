//! Sample size, power and duration planning for controlled experiments
//!
//! This crate re-exports the workspace members:
//!
//! - [`power_core`]: errors, metric and parameter types, experiment designs
//! - [`power_sample_size`]: the sample-size, power and MDE engine
//! - [`power_planning`]: duration, sample ratio monitoring and JSON-driven planning
//!
//! The most common entry points are also available at the top level.
//!
//! ```rust
//! use experiment_power::{calculate_sample_size, ExperimentDesign, MetricSpec, StatisticalParams};
//!
//! let result = calculate_sample_size(
//!     &ExperimentDesign::AbTest,
//!     &MetricSpec::binary("conversion", 0.05),
//!     &StatisticalParams::default().with_relative_mde(10.0),
//! ).unwrap();
//! assert_eq!(result.sample_size_per_variant, 31235);
//! ```

pub use power_core;
pub use power_planning;
pub use power_sample_size;

pub use power_core::{
    Error, ExperimentDesign, MdeType, MetricSpec, MetricType, Result, StatisticalParams,
};
pub use power_planning::{
    check_sample_ratio, estimate_duration, plan, DurationEstimate, ExperimentConfig,
    ExperimentPlan, TrafficParams,
};
pub use power_sample_size::{
    calculate_sample_size, mde_analysis, power_analysis, DesignOutcome, SampleSizeResult,
};
