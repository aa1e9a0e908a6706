// src/error.rs
use thiserror::Error;

/// Error types for the fast-bs library
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// A numeric input violates a stated precondition
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// A sweep or grid request is malformed
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// A tag that does not name a known option type or sweep variable
    #[error("Unknown {kind} '{name}'")]
    UnknownVariant { kind: &'static str, name: String },

    /// The kernel was handed a zero volatility or maturity, or an input whose
    /// prices or Greeks overflow to a non-finite value
    #[error("Domain error: '{parameter}' = {value} is outside the pricing kernel's domain")]
    DomainError { parameter: String, value: f64 },
}

impl PricingError {
    /// True for every error a caller caused through bad inputs.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            PricingError::InvalidParameters { .. }
                | PricingError::InvalidConfiguration { .. }
                | PricingError::UnknownVariant { .. }
        )
    }

    pub fn is_domain_error(&self) -> bool {
        matches!(self, PricingError::DomainError { .. })
    }
}

/// Result type alias for fast-bs operations
pub type PricingResult<T> = Result<T, PricingError>;

/// Validation utilities
pub mod validation {
    use super::{PricingError, PricingResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> PricingResult<()> {
        // NaN fails the comparison and is rejected here as well
        if !(value > 0.0) {
            Err(PricingError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> PricingResult<()> {
        if !(value >= 0.0) {
            Err(PricingError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> PricingResult<()> {
        if !value.is_finite() {
            Err(PricingError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate the point count of a linspace
    pub fn validate_steps(field: &str, steps: usize) -> PricingResult<()> {
        if steps < 2 {
            Err(PricingError::InvalidConfiguration {
                field: field.to_string(),
                reason: format!("must be at least 2, got {}", steps),
            })
        } else if steps > 1_000_000 {
            Err(PricingError::InvalidConfiguration {
                field: field.to_string(),
                reason: "exceeds maximum allowed (1,000,000)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that `[min, max]` is a finite, non-degenerate interval
    ///
    /// The width `max - min` must be finite as well, otherwise a linspace over
    /// the interval would produce NaN points.
    pub fn validate_range(field: &str, min: f64, max: f64) -> PricingResult<()> {
        validate_finite(&format!("{}.min", field), min)?;
        validate_finite(&format!("{}.max", field), max)?;
        if min >= max {
            Err(PricingError::InvalidConfiguration {
                field: field.to_string(),
                reason: format!("range_min ({}) must be below range_max ({})", min, max),
            })
        } else if !(max - min).is_finite() {
            Err(PricingError::InvalidConfiguration {
                field: field.to_string(),
                reason: format!("range width overflows ({} to {})", min, max),
            })
        } else {
            Ok(())
        }
    }
}
