//! Multi-armed bandits
//!
//! A bandit does not size a fixed-sample test. It splits a fixed observation
//! budget into an exploration share, spread evenly over the arms, and the
//! exploitation remainder.

use crate::result::{ceil_count, DesignOutcome, Notes, SampleSizeResult};
use power_core::{BanditParams, Result, StatisticalParams};
use tracing::debug;

const ADAPTIVE_WARNING: &str = "Multi-armed bandits adapt allocation during the experiment and do not use fixed-sample hypothesis testing; power and MDE are not directly applicable";

/// Expected regret of uniform exploration, `ε × horizon × (k - 1) / k`
pub fn estimated_regret(params: &BanditParams) -> f64 {
    let arms = params.num_arms as f64;
    params.exploration_rate * params.horizon as f64 * (arms - 1.0) / arms
}

/// Budget the exploration phase of a bandit
pub fn plan_bandit(
    bandit: &BanditParams,
    params: &StatisticalParams,
    mut notes: Notes,
) -> Result<SampleSizeResult> {
    let explore_budget =
        ceil_count(bandit.horizon as f64 * bandit.exploration_rate, "exploration budget")?;
    let per_arm_explore = explore_budget.div_ceil(bandit.num_arms as u64);
    let regret = estimated_regret(bandit);
    debug!(explore_budget, per_arm_explore, regret, "bandit exploration budget");

    notes.assume(format!(
        "ε-greedy bandit over {} arms: {:.0}% of a {} observation horizon spent exploring",
        bandit.num_arms,
        bandit.exploration_rate * 100.0,
        bandit.horizon
    ));
    notes.warn(ADAPTIVE_WARNING);

    Ok(SampleSizeResult::new(
        per_arm_explore,
        bandit.horizon,
        params.power,
        params.mde,
        notes,
        DesignOutcome::Bandit {
            explore_budget,
            per_arm_explore,
            estimated_regret: regret,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_three_arm_budget() {
        let bandit = BanditParams::new(3, 100_000, 0.1);
        let result =
            plan_bandit(&bandit, &StatisticalParams::default(), Notes::default()).unwrap();
        assert_eq!(result.sample_size_per_variant, 3334);
        assert_eq!(result.total_sample_size, 100_000);
        assert!(result.is_adaptive());
        assert_abs_diff_eq!(result.estimated_regret().unwrap(), 6666.67, epsilon = 0.01);
        assert_eq!(result.warnings, vec![ADAPTIVE_WARNING.to_string()]);
    }

    #[test]
    fn test_no_exploration() {
        let bandit = BanditParams::new(2, 5000, 0.0);
        let result =
            plan_bandit(&bandit, &StatisticalParams::default(), Notes::default()).unwrap();
        assert_eq!(result.sample_size_per_variant, 0);
        assert_eq!(result.estimated_regret(), Some(0.0));
    }
}
