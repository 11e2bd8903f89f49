//! Pure business validators run by every write path before persistence.
//!
//! Validators never touch the database and report failures as values; the
//! services convert the first failure into a `ServiceError` and abort.

pub mod address;
pub mod blank_fields;
pub mod operational_hours;

use std::fmt;

use crate::errors::ServiceError;

pub use address::check_address;
pub use blank_fields::check_blank_fields;
pub use operational_hours::check_operational_hours;

/// A single validation failure with a caller-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    message: String,
}

impl ValidationIssue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationIssue {}

impl From<ValidationIssue> for ServiceError {
    fn from(issue: ValidationIssue) -> Self {
        ServiceError::ValidationError(issue.message)
    }
}
