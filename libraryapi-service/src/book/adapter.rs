use libraryapi_model::model::{
    author::AuthorId,
    book::{BookId, BookModel},
    error::LibraryError,
};

use crate::{
    book::{
        delete_book_command::DeleteBookCommand,
        register_book_command::{RegisterBookCommand, RegisterBookCommandInput},
        repository::BookRepositoryArc,
    },
    error::AppResult,
};

/// Entry point for book operations.
#[derive(Debug)]
pub struct BookAdapter {
    book_repository: BookRepositoryArc,
    register_book_command: RegisterBookCommand,
    delete_book_command: DeleteBookCommand,
}

impl BookAdapter {
    pub fn new(book_repository: BookRepositoryArc) -> Self {
        BookAdapter {
            register_book_command: RegisterBookCommand::new(book_repository.clone()),
            delete_book_command: DeleteBookCommand::new(book_repository.clone()),
            book_repository,
        }
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no book has that id.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: &BookId) -> AppResult<BookModel> {
        self.book_repository
            .select(id)
            .await?
            .map(BookModel::from)
            .ok_or_else(|| LibraryError::not_found(id).into())
    }

    #[tracing::instrument(skip(self))]
    pub async fn register(&self, title: &str, author_id: AuthorId) -> AppResult<BookModel> {
        let output = self
            .register_book_command
            .execute(RegisterBookCommandInput { title, author_id })
            .await?;
        Ok(output.book)
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_by_author(&self, author_id: &AuthorId) -> AppResult<Vec<BookModel>> {
        Ok(self
            .book_repository
            .select_by_author(author_id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn has_books(&self, author_id: &AuthorId) -> AppResult<bool> {
        self.book_repository.exists_by_author(author_id).await
    }

    /// Removes a book, releasing its author for deletion once no other book
    /// references it.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: BookId) -> AppResult<()> {
        self.delete_book_command.execute(id).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{NaiveDate, Utc};

    use crate::{
        author::repository::AuthorRecordOwned, book::repository::memory::MemoryBookRepository,
        database::memory::MemoryDatabase,
    };

    use super::*;

    #[tokio::test]
    async fn get_and_delete() {
        let author = AuthorRecordOwned {
            id: AuthorId::generate(),
            create_time: Utc::now(),
            name: "Cecília Meireles".into(),
            birth_date: NaiveDate::from_ymd_opt(1901, 11, 7).unwrap(),
            nationality: "Brasileira".into(),
        };
        let author_id = author.id;
        let adapter = BookAdapter::new(Arc::new(MemoryBookRepository::new(
            MemoryDatabase::with_data(vec![author], vec![]),
        )));

        let book = adapter.register("Romanceiro da Inconfidência", author_id).await.unwrap();
        assert_eq!(adapter.get(&book.id).await.unwrap(), book);

        adapter.delete(book.id).await.unwrap();
        assert!(matches!(
            adapter.get(&book.id).await.unwrap_err().as_library(),
            Some(LibraryError::NotFound { .. })
        ));
        assert!(matches!(
            adapter.delete(book.id).await.unwrap_err().as_library(),
            Some(LibraryError::NotFound { .. })
        ));
    }
}
