//! Experiment configuration documents
//!
//! A configuration snapshot is what a UI or an assistant hands to the engine:
//! the design, the primary metric, the statistical settings and optionally
//! the traffic used for a duration estimate.

use crate::duration::TrafficParams;
use power_core::{ExperimentDesign, MetricSpec, Result, StatisticalParams};
use serde::{Deserialize, Serialize};

/// Complete input for one planning calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentConfig {
    #[serde(default)]
    pub design: ExperimentDesign,
    pub metric: MetricSpec,
    #[serde(default)]
    pub params: StatisticalParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic: Option<TrafficParams>,
}

impl ExperimentConfig {
    pub fn new(design: ExperimentDesign, metric: MetricSpec, params: StatisticalParams) -> Self {
        Self {
            design,
            metric,
            params,
            traffic: None,
        }
    }

    pub fn with_traffic(mut self, traffic: TrafficParams) -> Self {
        self.traffic = Some(traffic);
        self
    }

    /// Parse a JSON configuration document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the statistical settings and the active design
    pub fn validate(&self) -> Result<()> {
        self.params.validate()?;
        self.design.validate()
    }
}
