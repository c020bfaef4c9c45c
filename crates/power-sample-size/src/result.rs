//! Sample-size result records
//!
//! A [`SampleSizeResult`] is a snapshot: the fields every design reports plus
//! one [`DesignOutcome`] carrying whatever only that design produces.

use power_core::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Assumptions and warnings accumulated while a result is built
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notes {
    pub assumptions: Vec<String>,
    pub warnings: Vec<String>,
}

impl Notes {
    pub fn assume(&mut self, text: impl Into<String>) {
        self.assumptions.push(text.into());
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.warnings.push(text.into());
    }
}

/// Design-specific part of a result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DesignOutcome {
    /// No design adjustment was applied
    Standard,
    #[serde(rename_all = "camelCase")]
    Cluster {
        design_effect: f64,
        clusters_per_arm: u64,
        /// Clusters across all variants
        clusters_needed: u64,
    },
    #[serde(rename_all = "camelCase")]
    Switchback {
        /// (1 - ρ) / (1 + ρ)
        effective_multiplier: f64,
        effective_periods: u64,
    },
    #[serde(rename_all = "camelCase")]
    Factorial {
        total_cells: u64,
        cell_sample_size: u64,
        /// Present when interaction detection was requested
        interaction_sample_size: Option<u64>,
    },
    #[serde(rename_all = "camelCase")]
    Bandit {
        explore_budget: u64,
        per_arm_explore: u64,
        estimated_regret: f64,
    },
    #[serde(rename_all = "camelCase")]
    Causal {
        method: &'static str,
        method_notes: Vec<String>,
    },
}

/// Output of a sample-size calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleSizeResult {
    /// Units per variant (per cell for factorial, per arm exploration for bandits)
    pub sample_size_per_variant: u64,
    pub total_sample_size: u64,
    pub calculated_power: f64,
    /// MDE in the unit it was supplied in
    pub calculated_mde: f64,
    pub assumptions: Vec<String>,
    pub warnings: Vec<String>,
    pub design: DesignOutcome,
}

impl SampleSizeResult {
    pub(crate) fn new(
        sample_size_per_variant: u64,
        total_sample_size: u64,
        calculated_power: f64,
        calculated_mde: f64,
        notes: Notes,
        design: DesignOutcome,
    ) -> Self {
        Self {
            sample_size_per_variant,
            total_sample_size,
            calculated_power,
            calculated_mde,
            assumptions: notes.assumptions,
            warnings: notes.warnings,
            design,
        }
    }

    /// Whether power and MDE are not meaningful in the fixed-sample sense
    pub fn is_adaptive(&self) -> bool {
        matches!(self.design, DesignOutcome::Bandit { .. })
    }

    pub fn design_effect(&self) -> Option<f64> {
        match self.design {
            DesignOutcome::Cluster { design_effect, .. } => Some(design_effect),
            _ => None,
        }
    }

    pub fn clusters_needed(&self) -> Option<u64> {
        match self.design {
            DesignOutcome::Cluster { clusters_needed, .. } => Some(clusters_needed),
            _ => None,
        }
    }

    pub fn effective_periods(&self) -> Option<u64> {
        match self.design {
            DesignOutcome::Switchback {
                effective_periods, ..
            } => Some(effective_periods),
            _ => None,
        }
    }

    pub fn total_cells(&self) -> Option<u64> {
        match self.design {
            DesignOutcome::Factorial { total_cells, .. } => Some(total_cells),
            _ => None,
        }
    }

    pub fn estimated_regret(&self) -> Option<f64> {
        match self.design {
            DesignOutcome::Bandit {
                estimated_regret, ..
            } => Some(estimated_regret),
            _ => None,
        }
    }

    pub fn method_notes(&self) -> &[String] {
        match &self.design {
            DesignOutcome::Causal { method_notes, .. } => method_notes,
            _ => &[],
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

impl fmt::Display for SampleSizeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} per variant, {} total (power {:.0}%)",
            self.sample_size_per_variant,
            self.total_sample_size,
            self.calculated_power * 100.0
        )
    }
}

/// Round a real-valued count up to an integer, rejecting non-finite values
pub(crate) fn ceil_count(value: f64, context: &str) -> Result<u64> {
    if !value.is_finite() || value < 0.0 || value >= u64::MAX as f64 {
        return Err(Error::non_finite(context));
    }
    Ok(value.ceil() as u64)
}
