//! Standard normal quantiles and probabilities
//!
//! Every sample-size, power and MDE formula in the workspace reduces to the
//! pair of critical values `zα = Φ⁻¹(1 - α/2)` and `zβ = Φ⁻¹(power)`.

use crate::{Error, Result};
use statrs::distribution::{ContinuousCDF, Normal};

fn standard_normal() -> Result<Normal> {
    Normal::new(0.0, 1.0)
        .map_err(|e| Error::Computation(format!("Failed to create normal distribution: {e}")))
}

/// Check that a probability-like parameter lies strictly inside (0, 1)
pub fn check_open_unit(name: &str, value: f64) -> Result<()> {
    if !(value > 0.0 && value < 1.0) {
        return Err(Error::out_of_range(name, value, "(0, 1)"));
    }
    Ok(())
}

/// Standard normal CDF Φ(x)
pub fn normal_cdf(x: f64) -> Result<f64> {
    Ok(standard_normal()?.cdf(x))
}

/// Standard normal quantile Φ⁻¹(p) for p in (0, 1)
pub fn normal_quantile(p: f64) -> Result<f64> {
    check_open_unit("p", p)?;
    Ok(standard_normal()?.inverse_cdf(p))
}

/// Critical values for a two-sided test at `alpha` with target `power`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalValues {
    /// Φ⁻¹(1 - α/2)
    pub z_alpha: f64,
    /// Φ⁻¹(power)
    pub z_beta: f64,
}

impl CriticalValues {
    /// Compute both critical values, rejecting alpha or power outside (0, 1)
    pub fn new(alpha: f64, power: f64) -> Result<Self> {
        check_open_unit("alpha", alpha)?;
        check_open_unit("power", power)?;
        Ok(Self {
            z_alpha: normal_quantile(1.0 - alpha / 2.0)?,
            z_beta: normal_quantile(power)?,
        })
    }

    /// (zα + zβ)²
    pub fn squared_sum(&self) -> f64 {
        let sum = self.z_alpha + self.z_beta;
        sum * sum
    }
}

/// Two-sided critical value Φ⁻¹(1 - α/2)
pub fn z_alpha(alpha: f64) -> Result<f64> {
    check_open_unit("alpha", alpha)?;
    normal_quantile(1.0 - alpha / 2.0)
}
