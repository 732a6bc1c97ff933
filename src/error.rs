//! Error types shared by the domain model and the aggregation engines.

use thiserror::Error;

/// An entity invariant was violated at construction or append time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A name-like field was empty or whitespace only.
    #[error("{field} cannot be null or empty")]
    BlankName { field: &'static str },
    /// A numeric field that must be non-negative was below zero.
    #[error("{field} cannot be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
    /// A numeric field was NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    /// The date carried the unset sentinel instead of a real calendar date.
    #[error("date must be a valid calendar date")]
    UnsetDate,
}

/// Failure of a single aggregation run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregationError {
    /// The generation report or the reference factors were not supplied.
    #[error("missing reference data: {0} is required")]
    MissingReferenceData(&'static str),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Checks that `value` is finite and `>= 0`.
pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(value)
}

/// Checks that `value` is non-empty after trimming whitespace.
pub(crate) fn non_blank(
    field: &'static str,
    value: impl Into<String>,
) -> Result<String, ValidationError> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(ValidationError::BlankName { field });
    }
    Ok(value)
}
