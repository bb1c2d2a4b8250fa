use async_trait::async_trait;
use chrono::Utc;
use itertools::Itertools;
use libraryapi_model::model::{author::AuthorId, book::BookId, error::LibraryError};

use crate::{
    book::repository::{BookRecordInsert, BookRecordOwned, BookRepository},
    database::memory::MemoryDatabase,
    error::AppResult,
};

/// In-memory implementation of the book repository.
#[derive(Debug, Clone)]
pub struct MemoryBookRepository {
    database: MemoryDatabase,
}

impl MemoryBookRepository {
    pub fn new(database: MemoryDatabase) -> Self {
        Self { database }
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn insert(&self, record: BookRecordInsert) -> AppResult<BookRecordOwned> {
        let mut state = self.database.write().await;
        if !state.authors.contains_key(&record.author_id) {
            return Err(LibraryError::not_found(record.author_id).into());
        }

        let book = BookRecordOwned {
            id: BookId::generate(),
            create_time: Utc::now(),
            title: record.title,
            author_id: record.author_id,
        };
        state.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn select(&self, id: &BookId) -> AppResult<Option<BookRecordOwned>> {
        let state = self.database.read().await;
        Ok(state.books.get(id).cloned())
    }

    async fn select_by_author(&self, author_id: &AuthorId) -> AppResult<Vec<BookRecordOwned>> {
        let state = self.database.read().await;
        Ok(state
            .books
            .values()
            .filter(|book| &book.author_id == author_id)
            .sorted_unstable_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)))
            .cloned()
            .collect())
    }

    async fn exists_by_author(&self, author_id: &AuthorId) -> AppResult<bool> {
        let state = self.database.read().await;
        Ok(state.has_books(author_id))
    }

    async fn delete(&self, id: &BookId) -> AppResult<bool> {
        let mut state = self.database.write().await;
        Ok(state.books.remove(id).is_some())
    }
}
