//! Duration estimation
//!
//! Converts a total sample-size requirement into calendar days given the
//! daily traffic that reaches the experiment.

use power_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Runs shorter than this miss a full weekly cycle
pub const MIN_RECOMMENDED_DAYS: u64 = 7;
/// Runs longer than this are exposed to novelty decay and identifier churn
pub const MAX_RECOMMENDED_DAYS: u64 = 56;

/// Traffic available to an experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficParams {
    /// Eligible units per day before allocation
    pub daily_traffic: f64,
    /// Extra days added after the sample is reached
    #[serde(default)]
    pub buffer_days: u32,
}

impl TrafficParams {
    pub fn new(daily_traffic: f64) -> Self {
        Self {
            daily_traffic,
            buffer_days: 0,
        }
    }

    pub fn with_buffer_days(mut self, days: u32) -> Self {
        self.buffer_days = days;
        self
    }
}

/// Calendar estimate for reaching a sample size
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationEstimate {
    pub days: u64,
    pub weeks: u64,
    /// Units entering the experiment per day, after allocation
    pub traffic_per_day: f64,
    pub assumptions: Vec<String>,
    pub warnings: Vec<String>,
}

/// Estimate how long collecting `total_sample_size` units takes
///
/// `allocation` is the percent of traffic sent to each variant; it may sum
/// to less than 100 when only part of the traffic is enrolled.
pub fn estimate_duration(
    total_sample_size: u64,
    daily_traffic: f64,
    allocation: &[f64],
    buffer_days: u32,
) -> Result<DurationEstimate> {
    if !(daily_traffic > 0.0) || !daily_traffic.is_finite() {
        return Err(Error::ZeroTraffic(format!(
            "daily traffic must be positive, got {daily_traffic}"
        )));
    }
    if let Some(bad) = allocation.iter().find(|&&a| a < 0.0 || !a.is_finite()) {
        return Err(Error::InvalidAllocation(format!(
            "allocation entries must be non-negative, got {bad}"
        )));
    }
    let enrolled: f64 = allocation.iter().sum();
    let traffic_per_day = daily_traffic * (enrolled / 100.0);
    if !(traffic_per_day > 0.0) {
        return Err(Error::ZeroTraffic(
            "allocation sends no traffic to the experiment".to_string(),
        ));
    }

    let raw_days = (total_sample_size as f64 / traffic_per_day).ceil();
    if !raw_days.is_finite() || raw_days >= u64::MAX as f64 {
        return Err(Error::non_finite("collection days"));
    }
    let collection_days = raw_days as u64;
    let days = collection_days
        .checked_add(buffer_days as u64)
        .ok_or_else(|| Error::Computation("duration in days overflows".to_string()))?;
    let weeks = days.div_ceil(7);
    debug!(traffic_per_day, collection_days, days, weeks, "duration estimate");

    let mut assumptions = vec![
        format!("{daily_traffic} eligible units per day, {enrolled}% enrolled"),
        format!("{traffic_per_day:.0} units enter the experiment per day"),
    ];
    if buffer_days > 0 {
        assumptions.push(format!("{buffer_days} buffer days added"));
    }

    let mut warnings = Vec::new();
    if days < MIN_RECOMMENDED_DAYS {
        warnings.push(format!(
            "Runs shorter than {MIN_RECOMMENDED_DAYS} days do not capture weekly seasonality; consider running a full week"
        ));
    }
    if days > MAX_RECOMMENDED_DAYS {
        warnings.push(format!(
            "Runs longer than {MAX_RECOMMENDED_DAYS} days are exposed to novelty decay and identifier churn"
        ));
    }

    Ok(DurationEstimate {
        days,
        weeks,
        traffic_per_day,
        assumptions,
        warnings,
    })
}
