use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libraryapi_model::model::{
    author::AuthorId,
    book::{BookId, BookModel},
};

use crate::error::AppResult;

/// In-memory repository implementation.
pub mod memory;

/// `SQLite` repository implementation.
pub mod sqlite;

#[derive(Debug)]
pub struct BookRecordInsert {
    pub title: String,
    pub author_id: AuthorId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecordOwned {
    pub id: BookId,
    pub create_time: DateTime<Utc>,
    pub title: String,
    pub author_id: AuthorId,
}

#[async_trait]
pub trait BookRepository: Debug {
    /// Inserts a book for an existing author.
    ///
    /// The author lookup and the insertion happen in one atomic scope, so a
    /// concurrent guarded delete either sees the book or removes the author
    /// first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the author does not exist, or an internal error
    /// if the insertion fails.
    async fn insert(&self, record: BookRecordInsert) -> AppResult<BookRecordOwned>;

    async fn select(&self, id: &BookId) -> AppResult<Option<BookRecordOwned>>;

    /// Selects the books of an author, ordered by title and then id.
    async fn select_by_author(&self, author_id: &AuthorId) -> AppResult<Vec<BookRecordOwned>>;

    /// Whether at least one book references the author.
    async fn exists_by_author(&self, author_id: &AuthorId) -> AppResult<bool>;

    /// Returns `true` if a book was removed.
    async fn delete(&self, id: &BookId) -> AppResult<bool>;
}

pub type BookRepositoryArc = Arc<dyn BookRepository + Send + Sync>;

impl From<BookRecordOwned> for BookModel {
    fn from(record: BookRecordOwned) -> Self {
        BookModel {
            id: record.id,
            title: record.title,
            author_id: record.author_id,
            create_time: record.create_time,
        }
    }
}
