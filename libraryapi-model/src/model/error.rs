use std::fmt::Display;

use itertools::Itertools;
use thiserror::Error;

/// Errors surfaced by the catalog to its callers.
///
/// Each variant is terminal for the current call. Callers map them to their
/// own outcomes (e.g. HTTP 400, 404 or 409).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    /// One or more field values fail their constraints.
    ///
    /// Carries every violation found, not only the first one.
    #[error("invalid `{name}`: {}", .violations.iter().join("; "))]
    Validation {
        name: String,
        violations: Vec<FieldViolation>,
    },

    /// The call itself is malformed, e.g. updating a record without an id.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A domain rule blocks an otherwise well-formed request.
    #[error("operation not allowed: {0}")]
    OperationNotAllowed(String),

    /// A mutation targets a record that does not exist.
    #[error("`{resource}` not found")]
    NotFound { resource: String },

    /// A record with the same identifying attributes already exists.
    #[error("`{resource}` already exists")]
    AlreadyExists { resource: String },
}

/// A single failed field constraint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {error}")]
pub struct FieldViolation {
    pub field: String,
    pub error: CommonError,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommonError {
    #[error("no value provided for required field")]
    RequiredFieldMissing,
    #[error("must be at least {min} characters long")]
    TooShort { min: usize },
    #[error("must be at most {max} characters long")]
    TooLong { max: usize },
    #[error("must be a date in the past")]
    NotInPast,
    #[error("expected `{expected_format}`, but got `{name}`")]
    InvalidName {
        expected_format: String,
        name: String,
    },
}

impl LibraryError {
    #[must_use]
    pub fn validation<N, V>(name: N, violations: V) -> Self
    where
        N: Display,
        V: IntoIterator<Item = FieldViolation>,
    {
        Self::Validation {
            name: name.to_string(),
            violations: violations.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn not_found<R: Display>(resource: R) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
        }
    }

    #[must_use]
    pub fn already_exists<R: Display>(resource: R) -> Self {
        Self::AlreadyExists {
            resource: resource.to_string(),
        }
    }

    /// Field violations carried by a validation error, empty otherwise.
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            Self::Validation { violations, .. } => violations,
            _ => &[],
        }
    }
}

impl FieldViolation {
    pub fn new<F: Display>(field: F, error: CommonError) -> Self {
        Self {
            field: field.to_string(),
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_violations() {
        let err = LibraryError::validation(
            "author",
            [
                FieldViolation::new("name", CommonError::RequiredFieldMissing),
                FieldViolation::new("birth_date", CommonError::NotInPast),
            ],
        );
        assert_eq!(
            err.to_string(),
            "invalid `author`: name: no value provided for required field; birth_date: must be a date in the past"
        );
        assert_eq!(err.violations().len(), 2);

        assert!(
            LibraryError::InvalidArgument("x".into())
                .violations()
                .is_empty()
        );
    }
}
