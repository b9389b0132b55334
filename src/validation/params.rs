//! Reusable domain checks applied before any formula is evaluated.
//!
//! Every public entry point of the crate validates its inputs with these
//! helpers, so numeric panics and NaN propagation never leak out of a
//! computation.

use super::error::SlabError;

/// Reject NaN and infinities.
pub fn require_finite(parameter: &str, value: f64) -> Result<(), SlabError> {
    if !value.is_finite() {
        return Err(SlabError::invalid_parameter(parameter, value, "must be finite"));
    }
    Ok(())
}

/// Finite and strictly greater than zero.
pub fn require_positive(parameter: &str, value: f64) -> Result<(), SlabError> {
    require_finite(parameter, value)?;
    if value <= 0.0 {
        return Err(SlabError::invalid_parameter(parameter, value, "must be > 0"));
    }
    Ok(())
}

/// Finite and non-negative.
pub fn require_non_negative(parameter: &str, value: f64) -> Result<(), SlabError> {
    require_finite(parameter, value)?;
    if value < 0.0 {
        return Err(SlabError::invalid_parameter(parameter, value, "must be >= 0"));
    }
    Ok(())
}

/// Finite and inside the open interval (low, high).
pub fn require_open_interval(
    parameter: &str,
    value: f64,
    low: f64,
    high: f64,
) -> Result<(), SlabError> {
    require_finite(parameter, value)?;
    if value <= low || value >= high {
        return Err(SlabError::InvalidParameter {
            parameter: parameter.to_string(),
            value,
            constraint: format!("must lie in the open interval ({}, {})", low, high),
        });
    }
    Ok(())
}
