use chrono::{NaiveDate, Utc};
use libraryapi_model::model::{
    author::AuthorModel, error::LibraryError, validation::validate_author,
};

use crate::error::AppResult;

pub const AUTHOR_RESOURCE_NAME: &str = "author";

/// Validates authors against the current date.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorValidator;

impl AuthorValidator {
    pub fn new() -> Self {
        Self
    }

    /// Checks every field constraint of `author`.
    ///
    /// # Errors
    ///
    /// Returns a validation error carrying all violations found.
    pub fn validate(&self, author: &AuthorModel) -> AppResult<()> {
        self.validate_at(author, Utc::now().date_naive())
    }

    pub fn validate_at(&self, author: &AuthorModel, today: NaiveDate) -> AppResult<()> {
        let violations = validate_author(author, today);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(LibraryError::validation(AUTHOR_RESOURCE_NAME, violations).into())
        }
    }
}
