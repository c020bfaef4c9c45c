//! Planning entry point: sample size plus optional duration

use crate::config::ExperimentConfig;
use crate::duration::{estimate_duration, DurationEstimate};
use power_core::Result;
use power_sample_size::{calculate_sample_size, SampleSizeResult};
use serde::Serialize;
use tracing::{debug, instrument};

/// Everything computed for one configuration snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentPlan {
    pub design: &'static str,
    pub sample_size: SampleSizeResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<DurationEstimate>,
}

impl ExperimentPlan {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Size the configured experiment and, when traffic is given, estimate its duration
#[instrument(skip_all, fields(design = %config.design))]
pub fn plan(config: &ExperimentConfig) -> Result<ExperimentPlan> {
    let sample_size = calculate_sample_size(&config.design, &config.metric, &config.params)?;

    let duration = match &config.traffic {
        Some(traffic) => Some(estimate_duration(
            sample_size.total_sample_size,
            traffic.daily_traffic,
            &config.params.traffic_allocation,
            traffic.buffer_days,
        )?),
        None => None,
    };
    debug!(
        total = sample_size.total_sample_size,
        days = ?duration.as_ref().map(|d| d.days),
        "experiment planned"
    );

    Ok(ExperimentPlan {
        design: config.design.name(),
        sample_size,
        duration,
    })
}
