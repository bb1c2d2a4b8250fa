use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use libraryapi_model::model::{
    author::{AuthorId, AuthorModel},
    search::{AuthorAttributes, AuthorQuery},
};

use crate::error::AppResult;

/// In-memory repository implementation.
pub mod memory;

/// `SQLite` repository implementation.
pub mod sqlite;

/// Author record for insertion operations.
///
/// The identifier and creation time are assigned by the repository.
#[derive(Debug)]
pub struct AuthorRecordInsert {
    pub name: String,
    pub birth_date: NaiveDate,
    pub nationality: String,
}

/// Complete author record with ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRecordOwned {
    pub id: AuthorId,
    pub create_time: DateTime<Utc>,
    pub name: String,
    pub birth_date: NaiveDate,
    pub nationality: String,
}

/// Author record for update operations.
///
/// Overwrites every mutable attribute of the record with the given id.
#[derive(Debug)]
pub struct AuthorRecordUpdate<'a> {
    pub id: &'a AuthorId,
    pub name: &'a str,
    pub birth_date: NaiveDate,
    pub nationality: &'a str,
}

/// Result of a guarded delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorDeleteOutcome {
    Deleted,
    /// At least one book references the author. Nothing was removed.
    Referenced,
    NotFound,
}

/// Repository trait for author data operations.
#[async_trait]
pub trait AuthorRepository: Debug {
    /// Inserts a new author and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if an author with the same name, birth date and
    /// nationality is stored, or an internal error if the insertion fails.
    async fn insert(&self, record: AuthorRecordInsert) -> AppResult<AuthorRecordOwned>;

    /// Overwrites an existing author.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if the new attributes collide with a different
    /// author, or an internal error if the update fails.
    ///
    /// # Returns
    ///
    /// Returns `true` if a record was updated, `false` if not found.
    async fn update(&self, update: AuthorRecordUpdate<'_>) -> AppResult<bool>;

    /// Selects an author record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection fails.
    async fn select(&self, id: &AuthorId) -> AppResult<Option<AuthorRecordOwned>>;

    /// Selects the authors matching `query`, ordered by name and then id.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection fails.
    async fn select_filtered(&self, query: &AuthorQuery) -> AppResult<Vec<AuthorRecordOwned>>;

    /// Deletes an author unless a book references it.
    ///
    /// The reference check and the removal happen in one atomic scope, so no
    /// book can be attached to the author in between.
    ///
    /// # Errors
    ///
    /// Returns an error if the deletion fails.
    async fn delete_unreferenced(&self, id: &AuthorId) -> AppResult<AuthorDeleteOutcome>;
}

pub type AuthorRepositoryArc = Arc<dyn AuthorRepository + Send + Sync>;

impl AuthorAttributes for AuthorRecordOwned {
    fn name(&self) -> &str {
        &self.name
    }

    fn nationality(&self) -> &str {
        &self.nationality
    }
}

impl From<AuthorRecordOwned> for AuthorModel {
    fn from(record: AuthorRecordOwned) -> Self {
        AuthorModel {
            id: Some(record.id),
            name: record.name,
            birth_date: record.birth_date,
            nationality: record.nationality,
            create_time: Some(record.create_time),
        }
    }
}
