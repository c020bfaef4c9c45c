//! Core types for experiment power analysis
//!
//! This crate holds the pieces every other experiment-power crate agrees on:
//!
//! - [`Error`] / [`Result`]: the rejection taxonomy for a single calculation
//! - [`MetricSpec`]: the primary metric being sized for
//! - [`StatisticalParams`]: alpha, power, MDE and traffic split
//! - [`ExperimentDesign`]: the closed set of designs with their own parameters
//! - [`normal`]: standard normal quantiles backed by `statrs`
//!
//! All records are plain values that serialize with the camelCase field names
//! used by configuration documents.
//!
//! # Example
//!
//! ```rust
//! use power_core::{ExperimentDesign, ClusterParams, StatisticalParams};
//!
//! let params = StatisticalParams::default().with_relative_mde(10.0);
//! params.validate().unwrap();
//!
//! let design = ExperimentDesign::Cluster(ClusterParams::new(0.05, 50));
//! design.validate().unwrap();
//! assert_eq!(design.name(), "CLUSTER");
//! ```

pub mod design;
pub mod error;
pub mod metric;
pub mod normal;
pub mod params;

pub use design::{
    BanditParams, CausalMethod, CausalParams, ClusterParams, ExperimentDesign, Factor,
    FactorialParams, SwitchbackParams,
};
pub use error::{Error, Result};
pub use metric::{Direction, MetricCategory, MetricSpec, MetricType};
pub use normal::CriticalValues;
pub use params::{validate_allocation, MdeType, StatisticalParams};
