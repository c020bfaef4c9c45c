//! Sample size, power and minimum detectable effect for experiment designs
//!
//! The engine is a set of pure functions over configuration snapshots:
//!
//! 1. [`resolve_effect_size`] turns a relative or absolute MDE into an
//!    absolute effect.
//! 2. A [`MetricFamily`] (binary, continuous, count) sizes a two-sample
//!    normal-approximation test for that effect.
//! 3. [`adjust_for_allocation`] inflates for an unequal split and for more
//!    than two variants.
//! 4. The design's adjuster (cluster, switchback, factorial, bandit, causal)
//!    applies its correction.
//! 5. The result is rounded, totalled and annotated with warnings.
//!
//! [`power_analysis`] and [`mde_analysis`] run the same models in the
//! inverse direction.
//!
//! # Example
//!
//! ```rust
//! use power_core::{ExperimentDesign, MetricSpec, StatisticalParams};
//! use power_sample_size::calculate_sample_size;
//!
//! let metric = MetricSpec::continuous("revenue", 50.0).with_variance(2500.0);
//! let params = StatisticalParams::default().with_relative_mde(5.0);
//!
//! let result = calculate_sample_size(&ExperimentDesign::AbTest, &metric, &params).unwrap();
//! assert_eq!(result.sample_size_per_variant, 6280);
//! assert_eq!(result.total_sample_size, 12560);
//! ```

pub mod adjusters;
mod allocation;
mod calculator;
mod effect;
mod family;
mod mde;
mod power;
mod result;

pub use allocation::{adjust_for_allocation, unequal_allocation_factor};
pub use calculator::{
    calculate_sample_size, CONVENTIONAL_ALPHA, CONVENTIONAL_POWER, MIN_RELIABLE_SAMPLE_SIZE,
    SMALL_RELATIVE_MDE,
};
pub use effect::{relative_effect, resolve_effect_size};
pub use family::{
    BinaryModel, ContinuousModel, CountModel, MetricFamily, MetricModel, VarianceSource,
    DEFAULT_COEFFICIENT_OF_VARIATION,
};
pub use mde::{mde_analysis, sample_size_for_target_mde, MdeEstimate};
pub use power::{achieved_power, power_analysis, power_for_params, PowerAnalysis};
pub use result::{DesignOutcome, Notes, SampleSizeResult};
