//! Experiment design types and their design-specific parameters
//!
//! The design is a closed set. Each variant carries exactly the parameters
//! its adjuster consults, so parameters of an inactive design cannot be
//! supplied, validated or read by accident.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Experiment design with its type-specific parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperimentDesign {
    /// Plain user-randomized A/B(/n) test
    #[default]
    AbTest,
    /// Randomization by cluster (store, region, classroom)
    Cluster(ClusterParams),
    /// Time-sliced alternation between treatment and control
    Switchback(SwitchbackParams),
    /// Full factorial over several factors
    Factorial(FactorialParams),
    /// Adaptive multi-armed bandit
    Mab(BanditParams),
    /// Observational or quasi-experimental causal study
    CausalInference(CausalParams),
}

impl ExperimentDesign {
    /// Tag used on the wire and in assumptions
    pub fn name(&self) -> &'static str {
        match self {
            Self::AbTest => "AB_TEST",
            Self::Cluster(_) => "CLUSTER",
            Self::Switchback(_) => "SWITCHBACK",
            Self::Factorial(_) => "FACTORIAL",
            Self::Mab(_) => "MAB",
            Self::CausalInference(_) => "CAUSAL_INFERENCE",
        }
    }

    /// Validate the parameters of the active design
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::AbTest => Ok(()),
            Self::Cluster(p) => p.validate(),
            Self::Switchback(p) => p.validate(),
            Self::Factorial(p) => p.validate(),
            Self::Mab(p) => p.validate(),
            Self::CausalInference(p) => p.validate(),
        }
    }
}

impl fmt::Display for ExperimentDesign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cluster-randomized design parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClusterParams {
    /// Intra-cluster correlation in [0, 1]
    #[serde(default)]
    pub icc: Option<f64>,
    /// Average units per cluster
    #[serde(default)]
    pub cluster_size: Option<u32>,
}

impl ClusterParams {
    pub fn new(icc: f64, cluster_size: u32) -> Self {
        Self {
            icc: Some(icc),
            cluster_size: Some(cluster_size),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(icc) = self.icc {
            if !(0.0..=1.0).contains(&icc) {
                return Err(Error::out_of_range("icc", icc, "[0, 1]"));
            }
        }
        if let Some(size) = self.cluster_size {
            if size < 2 {
                return Err(Error::out_of_range("clusterSize", size as f64, "[2, ∞)"));
            }
        }
        Ok(())
    }
}

/// Switchback design parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SwitchbackParams {
    #[serde(default)]
    pub num_periods: Option<u32>,
    /// Period length in hours
    #[serde(default)]
    pub period_length: Option<f64>,
    /// Lag-one autocorrelation between adjacent periods, in [0, 1)
    #[serde(default)]
    pub autocorrelation: Option<f64>,
}

impl SwitchbackParams {
    pub fn new(num_periods: u32, autocorrelation: f64) -> Self {
        Self {
            num_periods: Some(num_periods),
            period_length: None,
            autocorrelation: Some(autocorrelation),
        }
    }

    pub fn with_period_length(mut self, hours: f64) -> Self {
        self.period_length = Some(hours);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(rho) = self.autocorrelation {
            if !(0.0..1.0).contains(&rho) {
                return Err(Error::out_of_range("autocorrelation", rho, "[0, 1)"));
            }
        }
        if let Some(periods) = self.num_periods {
            if periods == 0 {
                return Err(Error::out_of_range("numPeriods", 0.0, "[1, ∞)"));
            }
        }
        if let Some(length) = self.period_length {
            if !(length > 0.0) {
                return Err(Error::out_of_range("periodLength", length, "(0, ∞)"));
            }
        }
        Ok(())
    }
}

/// One factor of a factorial design
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factor {
    pub name: String,
    pub levels: u32,
}

impl Factor {
    pub fn new(name: impl Into<String>, levels: u32) -> Self {
        Self {
            name: name.into(),
            levels,
        }
    }
}

/// Factorial design parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FactorialParams {
    #[serde(default)]
    pub factors: Vec<Factor>,
    #[serde(default)]
    pub detect_interaction: bool,
}

impl FactorialParams {
    pub fn new(factors: Vec<Factor>) -> Self {
        Self {
            factors,
            detect_interaction: false,
        }
    }

    pub fn with_interaction(mut self) -> Self {
        self.detect_interaction = true;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(f) = self.factors.iter().find(|f| f.levels < 2) {
            return Err(Error::InvalidRange(format!(
                "factor '{}' has {} levels, needs at least 2",
                f.name, f.levels
            )));
        }
        Ok(())
    }
}

/// Multi-armed bandit parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanditParams {
    pub num_arms: u32,
    /// Total observation budget
    pub horizon: u64,
    /// Fraction of the horizon spent exploring, ε in [0, 1]
    pub exploration_rate: f64,
}

impl BanditParams {
    pub fn new(num_arms: u32, horizon: u64, exploration_rate: f64) -> Self {
        Self {
            num_arms,
            horizon,
            exploration_rate,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_arms < 2 {
            return Err(Error::out_of_range("numArms", self.num_arms as f64, "[2, ∞)"));
        }
        if self.horizon == 0 {
            return Err(Error::out_of_range("horizon", 0.0, "[1, ∞)"));
        }
        if !(0.0..=1.0).contains(&self.exploration_rate) {
            return Err(Error::out_of_range(
                "explorationRate",
                self.exploration_rate,
                "[0, 1]",
            ));
        }
        Ok(())
    }
}

/// Causal-inference method and its method-specific inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "causalMethod", rename_all = "lowercase")]
pub enum CausalMethod {
    /// Difference-in-differences
    #[serde(rename_all = "camelCase")]
    Did {
        /// AR(1) serial correlation of the outcome across periods
        #[serde(default)]
        serial_correlation: Option<f64>,
    },
    /// Regression discontinuity
    #[serde(rename_all = "camelCase")]
    Rdd {
        #[serde(default)]
        bandwidth: Option<f64>,
    },
    /// Propensity score matching
    #[serde(rename_all = "camelCase")]
    Psm {
        #[serde(default)]
        caliper: Option<f64>,
    },
    /// Instrumental variables
    #[serde(rename_all = "camelCase")]
    Iv {
        /// First-stage F statistic of the instrument
        #[serde(default)]
        first_stage_f: Option<f64>,
    },
}

impl CausalMethod {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Did { .. } => "did",
            Self::Rdd { .. } => "rdd",
            Self::Psm { .. } => "psm",
            Self::Iv { .. } => "iv",
        }
    }
}

/// Causal-inference parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CausalParams {
    #[serde(flatten)]
    pub method: CausalMethod,
}

impl CausalParams {
    pub fn new(method: CausalMethod) -> Self {
        Self { method }
    }

    pub fn validate(&self) -> Result<()> {
        match self.method {
            CausalMethod::Did {
                serial_correlation: Some(rho),
            } if !(rho > -1.0 && rho < 1.0) => {
                Err(Error::out_of_range("serialCorrelation", rho, "(-1, 1)"))
            }
            CausalMethod::Rdd {
                bandwidth: Some(h),
            } if !(h > 0.0) => Err(Error::out_of_range("bandwidth", h, "(0, ∞)")),
            CausalMethod::Psm { caliper: Some(c) } if !(c > 0.0) => {
                Err(Error::out_of_range("caliper", c, "(0, ∞)"))
            }
            CausalMethod::Iv {
                first_stage_f: Some(f),
            } if !(f >= 0.0) => Err(Error::out_of_range("firstStageF", f, "[0, ∞)")),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_design_names() {
        assert_eq!(ExperimentDesign::AbTest.name(), "AB_TEST");
        assert_eq!(
            ExperimentDesign::Mab(BanditParams::new(3, 1000, 0.1)).to_string(),
            "MAB"
        );
    }

    #[test]
    fn test_cluster_validation() {
        assert!(ClusterParams::new(0.05, 50).validate().is_ok());
        assert!(ClusterParams::default().validate().is_ok());
        assert!(matches!(
            ClusterParams::new(0.05, 1).validate(),
            Err(Error::InvalidRange(_))
        ));
        assert!(ClusterParams::new(1.2, 10).validate().is_err());
    }

    #[test]
    fn test_switchback_validation() {
        assert!(SwitchbackParams::new(20, 0.0).validate().is_ok());
        assert!(SwitchbackParams::new(20, 0.99).validate().is_ok());
        assert!(SwitchbackParams::new(20, 1.0).validate().is_err());
        assert!(SwitchbackParams::new(20, -0.1).validate().is_err());
        assert!(SwitchbackParams::new(20, 0.3)
            .with_period_length(0.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_factorial_and_bandit_validation() {
        let p = FactorialParams::new(vec![Factor::new("color", 2), Factor::new("copy", 1)]);
        assert!(p.validate().is_err());

        assert!(BanditParams::new(1, 100, 0.1).validate().is_err());
        assert!(BanditParams::new(3, 0, 0.1).validate().is_err());
        assert!(BanditParams::new(3, 100, 1.5).validate().is_err());
        assert!(BanditParams::new(3, 100, 0.1).validate().is_ok());
    }

    #[test]
    fn test_causal_validation() {
        let did = CausalParams::new(CausalMethod::Did {
            serial_correlation: Some(1.0),
        });
        assert!(did.validate().is_err());
        let iv = CausalParams::new(CausalMethod::Iv {
            first_stage_f: Some(25.0),
        });
        assert!(iv.validate().is_ok());
    }

    #[test]
    fn test_design_serde_tags() {
        let json = r#"{"type": "CLUSTER", "icc": 0.05, "clusterSize": 50}"#;
        let design: ExperimentDesign = serde_json::from_str(json).unwrap();
        assert_eq!(design, ExperimentDesign::Cluster(ClusterParams::new(0.05, 50)));

        let json = r#"{"type": "AB_TEST"}"#;
        let design: ExperimentDesign = serde_json::from_str(json).unwrap();
        assert_eq!(design, ExperimentDesign::AbTest);

        let json = r#"{
            "type": "FACTORIAL",
            "factors": [{"name": "color", "levels": 3}, {"name": "copy", "levels": 2}],
            "detectInteraction": true
        }"#;
        let design: ExperimentDesign = serde_json::from_str(json).unwrap();
        match design {
            ExperimentDesign::Factorial(p) => {
                assert_eq!(p.factors.len(), 2);
                assert!(p.detect_interaction);
            }
            other => panic!("unexpected design {other:?}"),
        }
    }

    #[test]
    fn test_causal_serde() {
        let json = r#"{"causalMethod": "did", "serialCorrelation": 0.4}"#;
        let params: CausalParams = serde_json::from_str(json).unwrap();
        assert_eq!(
            params.method,
            CausalMethod::Did {
                serial_correlation: Some(0.4)
            }
        );

        let json = r#"{"causalMethod": "psm"}"#;
        let params: CausalParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.method.name(), "psm");
    }
}
