//! Validation trait and helpers for configuration types

use crate::error::{ConfigError, Result};

/// Trait for validating configuration values
///
/// Implement this for any config type that needs checks beyond what the type
/// system expresses. Errors name the offending field.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Value must lie in the closed range `[min, max]`
pub fn validate_range(field: impl Into<String>, value: f64, min: f64, max: f64) -> Result<()> {
    if !(min..=max).contains(&value) {
        return Err(ConfigError::OutOfRange {
            field: field.into(),
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Value must be strictly greater than `min` (and finite)
pub fn validate_min_exclusive(field: impl Into<String>, value: f64, min: f64) -> Result<()> {
    if !value.is_finite() || value <= min {
        return Err(ConfigError::ValidationError {
            field: field.into(),
            message: format!("must be > {}, got {}", min, value),
        });
    }
    Ok(())
}

/// Value must be finite and >= 0
pub fn validate_non_negative(field: impl Into<String>, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::ValidationError {
            field: field.into(),
            message: format!("must be >= 0, got {}", value),
        });
    }
    Ok(())
}

/// Integer must be above minimum
pub fn validate_positive(field: impl Into<String>, value: usize, min: usize) -> Result<()> {
    if value <= min {
        return Err(ConfigError::InvalidInteger {
            field: field.into(),
            value,
            min,
        });
    }
    Ok(())
}
