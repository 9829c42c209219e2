//! Configuration validation utilities and rules

use crate::TesseraError;
use std::fmt;

/// Configuration validation result
pub type ValidationResult = Result<(), ValidationError>;

/// A single failed validation rule
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Value is required but missing
    Required {
        /// Dotted field path
        field: String,
    },
    /// Value is out of acceptable range
    OutOfRange {
        /// Dotted field path
        field: String,
        /// Inclusive lower bound
        min: Option<u64>,
        /// Inclusive upper bound
        max: Option<u64>,
        /// Offending value
        actual: u64,
    },
    /// Value failed a rule that has no dedicated variant
    Custom {
        /// Dotted field path
        field: String,
        /// What is wrong with it
        message: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Required { field } => {
                write!(f, "Field '{field}' is required but missing")
            }
            ValidationError::OutOfRange {
                field,
                min,
                max,
                actual,
            } => {
                let range_desc = match (min, max) {
                    (Some(min), Some(max)) => format!("between {min} and {max}"),
                    (Some(min), None) => format!("at least {min}"),
                    (None, Some(max)) => format!("at most {max}"),
                    (None, None) => "in valid range".to_string(),
                };
                write!(f, "Field '{field}' must be {range_desc} (got {actual})")
            }
            ValidationError::Custom { field, message } => {
                write!(f, "Field '{field}': {message}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for TesseraError {
    fn from(err: ValidationError) -> Self {
        TesseraError::config(err.to_string())
    }
}

/// Accumulates validation failures so all of them are reported at once
#[derive(Debug, Default)]
pub struct ConfigValidator {
    errors: Vec<ValidationError>,
    field_prefix: String,
}

impl ConfigValidator {
    /// Create an empty validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator whose field names are prefixed with `prefix.`
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            errors: Vec::new(),
            field_prefix: prefix.into(),
        }
    }

    fn field_name(&self, field: &str) -> String {
        if self.field_prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{field}", self.field_prefix)
        }
    }

    /// Require `value` to lie within `[min, max]`
    pub fn range(&mut self, field: &str, value: u64, min: Option<u64>, max: Option<u64>) {
        let below = min.is_some_and(|m| value < m);
        let above = max.is_some_and(|m| value > m);
        if below || above {
            self.errors.push(ValidationError::OutOfRange {
                field: self.field_name(field),
                min,
                max,
                actual: value,
            });
        }
    }

    /// Require a non-empty string
    pub fn required(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.errors.push(ValidationError::Required {
                field: self.field_name(field),
            });
        }
    }

    /// Record a failure if `check` is false
    pub fn custom(&mut self, field: &str, check: bool, message: impl Into<String>) {
        if !check {
            self.errors.push(ValidationError::Custom {
                field: self.field_name(field),
                message: message.into(),
            });
        }
    }

    /// Merge another validator's failures into this one
    pub fn merge(&mut self, other: ConfigValidator) {
        self.errors.extend(other.errors);
    }

    /// Failures recorded so far
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// `Ok` if nothing failed, otherwise one error listing every failure
    pub fn finish(self) -> Result<(), TesseraError> {
        if self.errors.is_empty() {
            return Ok(());
        }
        let joined = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(TesseraError::config(joined))
    }
}
