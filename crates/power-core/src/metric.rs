//! Metric definitions
//!
//! A [`MetricSpec`] describes one tracked measurement. Its [`MetricType`]
//! selects the variance model used for sizing; `variance` and `std_dev` are
//! only consulted for continuous metrics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a metric plays in the experiment readout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricCategory {
    /// Decision metric the experiment is powered for
    #[default]
    Primary,
    /// Supporting metric
    Secondary,
    /// Metric that must not regress
    Guardrail,
    /// Tracked for diagnostics only
    Monitor,
}

/// Statistical family of a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricType {
    /// Proportion of units converting (0..1)
    Binary,
    /// Mean of a real-valued measurement
    Continuous,
    /// Rate of events per unit, modelled as Poisson
    Count,
}

impl MetricType {
    /// Human-readable family name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Continuous => "continuous",
            Self::Count => "count",
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Desired direction of movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Increase,
    Decrease,
    #[default]
    Either,
}

/// A tracked measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSpec {
    pub name: String,
    #[serde(default)]
    pub category: MetricCategory,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    #[serde(default)]
    pub direction: Direction,
    /// Baseline mean (continuous), rate (count) or proportion (binary)
    pub baseline: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std_dev: Option<f64>,
}

impl MetricSpec {
    /// Create a metric of the given family with default category and direction
    pub fn new(name: impl Into<String>, metric_type: MetricType, baseline: f64) -> Self {
        Self {
            name: name.into(),
            category: MetricCategory::default(),
            metric_type,
            direction: Direction::default(),
            baseline,
            variance: None,
            std_dev: None,
        }
    }

    pub fn binary(name: impl Into<String>, baseline: f64) -> Self {
        Self::new(name, MetricType::Binary, baseline)
    }

    pub fn continuous(name: impl Into<String>, baseline: f64) -> Self {
        Self::new(name, MetricType::Continuous, baseline)
    }

    pub fn count(name: impl Into<String>, baseline: f64) -> Self {
        Self::new(name, MetricType::Count, baseline)
    }

    pub fn with_variance(mut self, variance: f64) -> Self {
        self.variance = Some(variance);
        self
    }

    pub fn with_std_dev(mut self, std_dev: f64) -> Self {
        self.std_dev = Some(std_dev);
        self
    }

    pub fn with_category(mut self, category: MetricCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Variance supplied by the caller, preferring `variance` over `std_dev²`
    ///
    /// Returns `None` for non-continuous metrics, whose variance is implied
    /// by the family.
    pub fn explicit_variance(&self) -> Option<f64> {
        if self.metric_type != MetricType::Continuous {
            return None;
        }
        self.variance.or_else(|| self.std_dev.map(|sd| sd * sd))
    }
}
