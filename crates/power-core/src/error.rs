//! Error types for experiment power analysis
//!
//! Provides a unified error type for all experiment-power crates. Every
//! variant describes a single rejected calculation; nothing here is fatal
//! or retryable.

use thiserror::Error;

/// Core error type for sample-size, power and duration calculations
#[derive(Error, Debug)]
pub enum Error {
    /// The effect size resolves to zero, so the sample-size denominator vanishes
    #[error("Degenerate effect: {0}")]
    DegenerateEffect(String),

    /// Traffic allocation does not describe a valid split across variants
    #[error("Invalid allocation: {0}")]
    InvalidAllocation(String),

    /// A parameter lies outside its admissible range
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Duration cannot be estimated without traffic
    #[error("Zero traffic: {0}")]
    ZeroTraffic(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Malformed configuration document
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for a parameter outside its range
    pub fn out_of_range(name: &str, value: f64, range: &str) -> Self {
        Self::InvalidRange(format!("{name} = {value} must be in {range}"))
    }

    /// Create an error for a zero effect size
    pub fn degenerate(context: &str) -> Self {
        Self::DegenerateEffect(format!(
            "{context}: effect size is zero, no finite sample size exists"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::Computation(format!("{context} is NaN or infinite"))
    }

    /// Create an error for an allocation/variant count mismatch
    pub fn allocation_mismatch(expected: usize, actual: usize) -> Self {
        Self::InvalidAllocation(format!(
            "expected at least {expected} allocation entries, got {actual}"
        ))
    }
}
