use std::{collections::HashMap, sync::Arc};

use libraryapi_model::model::{author::AuthorId, book::BookId};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{author::repository::AuthorRecordOwned, book::repository::BookRecordOwned};

/// Collections held by a [`MemoryDatabase`].
#[derive(Debug, Default)]
pub struct MemoryState {
    pub authors: HashMap<AuthorId, AuthorRecordOwned>,
    pub books: HashMap<BookId, BookRecordOwned>,
}

/// In-memory database shared by the memory repositories.
///
/// Cloning yields another handle to the same state. A write guard covers both
/// collections, so anything done while holding it is atomic with respect to
/// every other repository operation.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryState {
    /// Whether any book references the author.
    pub fn has_books(&self, author_id: &AuthorId) -> bool {
        self.books.values().any(|book| &book.author_id == author_id)
    }
}

impl MemoryDatabase {
    /// Creates a new empty memory database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new memory database with initial data.
    ///
    /// # Arguments
    ///
    /// * `authors` - Initial authors to populate the database with
    /// * `books` - Initial books, expected to reference the given authors
    pub fn with_data(authors: Vec<AuthorRecordOwned>, books: Vec<BookRecordOwned>) -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState {
                authors: authors
                    .into_iter()
                    .map(|author| (author.id, author))
                    .collect(),
                books: books.into_iter().map(|book| (book.id, book)).collect(),
            })),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, MemoryState> {
        self.state.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, MemoryState> {
        self.state.write().await
    }
}
