use std::ops::RangeInclusive;

use chrono::NaiveDate;

use crate::model::{
    author::AuthorModel,
    book::BookModel,
    error::{CommonError, FieldViolation},
};

/// Checks the field constraints of an author.
///
/// Every violation is collected; an empty result means the author is valid.
/// The birth date must be strictly before `today`.
pub fn validate_author(author: &AuthorModel, today: NaiveDate) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    validate_text(
        &mut violations,
        AuthorModel::NAME_FIELD_NAME,
        &author.name,
        1..=AuthorModel::NAME_MAX_LENGTH,
    );
    if author.birth_date >= today {
        violations.push(FieldViolation::new(
            AuthorModel::BIRTH_DATE_FIELD_NAME,
            CommonError::NotInPast,
        ));
    }
    validate_text(
        &mut violations,
        AuthorModel::NATIONALITY_FIELD_NAME,
        &author.nationality,
        AuthorModel::NATIONALITY_MIN_LENGTH..=AuthorModel::NATIONALITY_MAX_LENGTH,
    );

    violations
}

pub fn validate_book_title(title: &str) -> Vec<FieldViolation> {
    let mut violations = Vec::new();
    validate_text(
        &mut violations,
        BookModel::TITLE_FIELD_NAME,
        title,
        1..=BookModel::TITLE_MAX_LENGTH,
    );
    violations
}

fn validate_text(
    violations: &mut Vec<FieldViolation>,
    field: &str,
    value: &str,
    length: RangeInclusive<usize>,
) {
    let value = value.trim();
    if value.is_empty() {
        violations.push(FieldViolation::new(field, CommonError::RequiredFieldMissing));
        return;
    }
    let count = value.chars().count();
    if count < *length.start() {
        violations.push(FieldViolation::new(
            field,
            CommonError::TooShort {
                min: *length.start(),
            },
        ));
    } else if count > *length.end() {
        violations.push(FieldViolation::new(
            field,
            CommonError::TooLong { max: *length.end() },
        ));
    }
}
