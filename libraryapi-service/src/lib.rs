//! Library API Service
//!
//! Author catalog for a library API. Authors can be searched by exact value or
//! by example, and are created, updated and deleted through validated
//! commands. An author stays in the catalog while any book references it.
//!
//! Two storage backends are provided: an in-memory one and a `SQLite` one.
//! Both keep the reference check and the deletion of an author atomic.

pub mod author;
pub mod book;
pub mod config;
pub mod database;
pub mod error;
pub mod tracing;

use std::sync::Arc;

use crate::{
    author::{
        adapter::AuthorAdapter,
        query_manager::AuthorQueryManager,
        repository::{
            AuthorRepositoryArc, memory::MemoryAuthorRepository, sqlite::SqliteAuthorRepository,
        },
    },
    book::{
        adapter::BookAdapter,
        repository::{BookRepositoryArc, memory::MemoryBookRepository, sqlite::SqliteBookRepository},
    },
    config::DatabaseConfig,
    database::{memory::MemoryDatabase, sqlite::SqliteDatabase},
    error::AppResult,
};

/// Author and book operations over one shared store.
#[derive(Debug)]
pub struct LibraryService {
    pub authors: AuthorAdapter,
    pub books: BookAdapter,
}

impl LibraryService {
    /// Wires the adapters to the given repositories.
    ///
    /// Both repositories must share the same underlying store, otherwise the
    /// delete guard cannot see the books.
    pub fn new(author_repository: AuthorRepositoryArc, book_repository: BookRepositoryArc) -> Self {
        let author_query_manager = AuthorQueryManager::new(Arc::clone(&author_repository));
        LibraryService {
            authors: AuthorAdapter::new(author_query_manager, author_repository),
            books: BookAdapter::new(book_repository),
        }
    }

    /// Creates a service over a fresh in-memory store.
    pub fn memory() -> Self {
        Self::memory_with(MemoryDatabase::new())
    }

    pub fn memory_with(database: MemoryDatabase) -> Self {
        Self::new(
            Arc::new(MemoryAuthorRepository::new(database.clone())),
            Arc::new(MemoryBookRepository::new(database)),
        )
    }

    pub fn sqlite(database: SqliteDatabase) -> Self {
        Self::new(
            Arc::new(SqliteAuthorRepository::new(database.clone())),
            Arc::new(SqliteBookRepository::new(database)),
        )
    }

    /// Creates a service over the configured store.
    ///
    /// # Errors
    ///
    /// Returns an error if the `SQLite` database cannot be opened.
    pub fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        Ok(match config {
            DatabaseConfig::Memory => Self::memory(),
            DatabaseConfig::Sqlite(sqlite) => Self::sqlite(SqliteDatabase::open(&sqlite.path)?),
        })
    }
}
