//! Metric-family variance models
//!
//! Each family reduces to the same two-sample normal approximation
//!
//! ```text
//! n  = 2 (zα + zβ)² σ² / δ²
//! SE = sqrt(2 σ² / n)
//! ```
//!
//! and differs only in the per-unit variance σ². Sample size, power and MDE
//! all go through [`MetricFamily::unit_variance`], so the forward and inverse
//! directions agree by construction.

use power_core::{CriticalValues, Error, MetricSpec, MetricType, Result};

/// Coefficient of variation assumed for continuous metrics without a variance
pub const DEFAULT_COEFFICIENT_OF_VARIATION: f64 = 0.1;

/// A variance model for one metric family
pub trait MetricFamily {
    /// Family this model implements
    fn metric_type(&self) -> MetricType;

    /// Per-unit variance σ² when the true absolute effect is `effect`
    fn unit_variance(&self, effect: f64) -> Result<f64>;

    /// Human-readable statement of what the model assumes
    fn describe(&self, effect: f64) -> String;

    /// Real-valued per-variant sample size for an absolute effect
    fn sample_size(&self, z: &CriticalValues, effect: f64) -> Result<f64> {
        if effect == 0.0 {
            return Err(Error::degenerate(self.metric_type().name()));
        }
        if !effect.is_finite() {
            return Err(Error::non_finite("effect size"));
        }
        let variance = self.unit_variance(effect)?;
        let n = 2.0 * z.squared_sum() * variance / (effect * effect);
        if !n.is_finite() {
            return Err(Error::non_finite("sample size"));
        }
        Ok(n)
    }

    /// Standard error of the difference in means with `n` units per variant
    fn standard_error(&self, n: f64, effect: f64) -> Result<f64> {
        if !(n > 0.0) || !n.is_finite() {
            return Err(Error::out_of_range("sample size", n, "(0, ∞)"));
        }
        Ok((2.0 * self.unit_variance(effect)? / n).sqrt())
    }
}

/// Two independent proportions with pooled variance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryModel {
    /// Control proportion p1
    control: f64,
}

impl BinaryModel {
    pub fn new(control: f64) -> Result<Self> {
        if !(control > 0.0 && control < 1.0) {
            return Err(Error::out_of_range("baseline proportion", control, "(0, 1)"));
        }
        Ok(Self { control })
    }

    pub fn control(&self) -> f64 {
        self.control
    }

    /// Treatment proportion p2 = p1 + effect
    pub fn treatment(&self, effect: f64) -> Result<f64> {
        let p2 = self.control + effect;
        if !(0.0..=1.0).contains(&p2) {
            return Err(Error::out_of_range("treatment proportion", p2, "[0, 1]"));
        }
        Ok(p2)
    }
}

impl MetricFamily for BinaryModel {
    fn metric_type(&self) -> MetricType {
        MetricType::Binary
    }

    fn unit_variance(&self, effect: f64) -> Result<f64> {
        let pooled = (self.control + self.treatment(effect)?) / 2.0;
        Ok(pooled * (1.0 - pooled))
    }

    fn describe(&self, effect: f64) -> String {
        format!(
            "Binary metric: two-proportion z-test with pooled variance (p1 = {:.4}, p2 = {:.4})",
            self.control,
            self.control + effect
        )
    }
}

/// Where a continuous model's variance came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarianceSource {
    /// `variance` or `stdDev` on the metric
    Supplied,
    /// `(0.1 × baseline)²`
    AssumedCoefficientOfVariation,
}

/// Difference in means with a common variance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousModel {
    variance: f64,
    source: VarianceSource,
}

impl ContinuousModel {
    pub fn new(variance: f64) -> Result<Self> {
        Self::with_source(variance, VarianceSource::Supplied)
    }

    /// Variance from a metric, falling back to a 10% coefficient of variation
    pub fn from_metric(metric: &MetricSpec) -> Result<Self> {
        match metric.explicit_variance() {
            Some(variance) => Self::new(variance),
            None => {
                let sd = DEFAULT_COEFFICIENT_OF_VARIATION * metric.baseline;
                Self::with_source(sd * sd, VarianceSource::AssumedCoefficientOfVariation)
            }
        }
    }

    fn with_source(variance: f64, source: VarianceSource) -> Result<Self> {
        if !(variance > 0.0) || !variance.is_finite() {
            return Err(Error::out_of_range("variance", variance, "(0, ∞)"));
        }
        Ok(Self { variance, source })
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    pub fn source(&self) -> VarianceSource {
        self.source
    }
}

impl MetricFamily for ContinuousModel {
    fn metric_type(&self) -> MetricType {
        MetricType::Continuous
    }

    fn unit_variance(&self, _effect: f64) -> Result<f64> {
        Ok(self.variance)
    }

    fn describe(&self, _effect: f64) -> String {
        match self.source {
            VarianceSource::Supplied => format!(
                "Continuous metric: two-sample z-test with variance {:.4}",
                self.variance
            ),
            VarianceSource::AssumedCoefficientOfVariation => format!(
                "Continuous metric: variance not supplied, assumed (0.1 × baseline)² = {:.4} (10% coefficient of variation)",
                self.variance
            ),
        }
    }
}

/// Poisson counts, variance equal to the mean
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountModel {
    lambda: f64,
}

impl CountModel {
    pub fn new(lambda: f64) -> Result<Self> {
        if !(lambda > 0.0) || !lambda.is_finite() {
            return Err(Error::out_of_range("baseline rate", lambda, "(0, ∞)"));
        }
        Ok(Self { lambda })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }
}

impl MetricFamily for CountModel {
    fn metric_type(&self) -> MetricType {
        MetricType::Count
    }

    fn unit_variance(&self, _effect: f64) -> Result<f64> {
        Ok(self.lambda)
    }

    fn describe(&self, _effect: f64) -> String {
        format!(
            "Count metric: Poisson approximation, variance = mean = {:.4}",
            self.lambda
        )
    }
}

/// The variance model selected by a metric's type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricModel {
    Binary(BinaryModel),
    Continuous(ContinuousModel),
    Count(CountModel),
}

impl MetricModel {
    /// Build the model implied by `metric.metric_type`
    pub fn for_metric(metric: &MetricSpec) -> Result<Self> {
        Ok(match metric.metric_type {
            MetricType::Binary => Self::Binary(BinaryModel::new(metric.baseline)?),
            MetricType::Continuous => Self::Continuous(ContinuousModel::from_metric(metric)?),
            MetricType::Count => Self::Count(CountModel::new(metric.baseline)?),
        })
    }

    fn inner(&self) -> &dyn MetricFamily {
        match self {
            Self::Binary(m) => m as &dyn MetricFamily,
            Self::Continuous(m) => m,
            Self::Count(m) => m,
        }
    }
}

impl MetricFamily for MetricModel {
    fn metric_type(&self) -> MetricType {
        self.inner().metric_type()
    }

    fn unit_variance(&self, effect: f64) -> Result<f64> {
        self.inner().unit_variance(effect)
    }

    fn describe(&self, effect: f64) -> String {
        self.inner().describe(effect)
    }
}
