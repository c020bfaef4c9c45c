//! Design-specific corrections
//!
//! One module per design. Cluster, switchback and causal adjusters rescale
//! the per-variant size and fall through to general packaging; factorial and
//! bandit adjusters produce a finished result of their own.

pub mod bandit;
pub mod causal;
pub mod cluster;
pub mod factorial;
pub mod switchback;

pub use bandit::plan_bandit;
pub use causal::adjust_causal;
pub use cluster::{adjust_cluster, design_effect};
pub use factorial::{plan_factorial, total_cells};
pub use switchback::{adjust_switchback, effective_multiplier};
