//! Calculation configuration shared by every design
//!
//! [`StatisticalParams`] holds the test-level settings. Design-specific
//! settings live on [`crate::ExperimentDesign`] so that only the active
//! design's fields exist at all.

use crate::normal::check_open_unit;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tolerance applied when checking that allocations sum to 100
pub const ALLOCATION_TOLERANCE: f64 = 1e-6;

/// How `mde` is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MdeType {
    /// Percent of the baseline
    #[default]
    Relative,
    /// Same unit as the baseline
    Absolute,
}

/// Test-level configuration for a sample-size calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticalParams {
    /// Significance level, two-sided
    pub alpha: f64,
    /// Target power (1 - β)
    pub power: f64,
    /// Minimum detectable effect, interpreted per `mde_type`
    pub mde: f64,
    #[serde(default)]
    pub mde_type: MdeType,
    /// Percent of traffic per variant, control first
    pub traffic_allocation: Vec<f64>,
    /// Number of variants including control
    pub variants: u32,
}

impl Default for StatisticalParams {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            power: 0.8,
            mde: 5.0,
            mde_type: MdeType::Relative,
            traffic_allocation: vec![50.0, 50.0],
            variants: 2,
        }
    }
}

impl StatisticalParams {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_power(mut self, power: f64) -> Self {
        self.power = power;
        self
    }

    pub fn with_relative_mde(mut self, percent: f64) -> Self {
        self.mde = percent;
        self.mde_type = MdeType::Relative;
        self
    }

    pub fn with_absolute_mde(mut self, mde: f64) -> Self {
        self.mde = mde;
        self.mde_type = MdeType::Absolute;
        self
    }

    /// Set the allocation and derive the variant count from its length
    pub fn with_allocation(mut self, allocation: Vec<f64>) -> Self {
        self.variants = allocation.len() as u32;
        self.traffic_allocation = allocation;
        self
    }

    /// Split traffic evenly across `variants`
    pub fn with_even_split(self, variants: u32) -> Self {
        let share = 100.0 / variants.max(1) as f64;
        self.with_allocation(vec![share; variants as usize])
    }

    /// Validate everything except the allocation
    pub fn validate_test_settings(&self) -> Result<()> {
        check_open_unit("alpha", self.alpha)?;
        check_open_unit("power", self.power)?;
        if self.variants < 2 {
            return Err(Error::out_of_range("variants", self.variants as f64, "[2, ∞)"));
        }
        if !self.mde.is_finite() {
            return Err(Error::non_finite("mde"));
        }
        Ok(())
    }

    /// Validate every field
    pub fn validate(&self) -> Result<()> {
        self.validate_test_settings()?;
        validate_allocation(&self.traffic_allocation, self.variants as usize)
    }
}

/// Check an allocation against a variant count
///
/// Entries beyond `variants` are tolerated but still count toward the sum.
pub fn validate_allocation(allocation: &[f64], variants: usize) -> Result<()> {
    if allocation.len() < variants {
        return Err(Error::allocation_mismatch(variants, allocation.len()));
    }
    if let Some(bad) = allocation.iter().find(|&&a| !(a > 0.0) || !a.is_finite()) {
        return Err(Error::InvalidAllocation(format!(
            "allocation entries must be positive, got {bad}"
        )));
    }
    let total: f64 = allocation.iter().sum();
    if (total - 100.0).abs() > ALLOCATION_TOLERANCE {
        return Err(Error::InvalidAllocation(format!(
            "allocation must sum to 100, got {total}"
        )));
    }
    Ok(())
}
