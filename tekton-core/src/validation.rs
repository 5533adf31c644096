//! Required-field checks
//!
//! Options are validated before a request is built so that obviously
//! incomplete calls never reach the service.

use thiserror::Error;

/// A required field is missing or holds an unusable value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value for `{field}`: {reason}")]
pub struct ValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong with it
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Types that can check their own required fields
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Fails when `value` is empty or only whitespace
pub fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(())
}

/// Fails unless exactly one of the two values is set
pub fn require_exactly_one<A, B>(
    field: &'static str,
    a: &Option<A>,
    b: &Option<B>,
    names: (&str, &str),
) -> Result<(), ValidationError> {
    match (a.is_some(), b.is_some()) {
        (true, false) | (false, true) => Ok(()),
        (true, true) => Err(ValidationError::new(
            field,
            format!("`{}` and `{}` cannot both be set", names.0, names.1),
        )),
        (false, false) => Err(ValidationError::new(
            field,
            format!("one of `{}` or `{}` is required", names.0, names.1),
        )),
    }
}
