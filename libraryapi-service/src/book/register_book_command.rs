use libraryapi_model::model::{
    author::AuthorId, book::BookModel, error::LibraryError, validation::validate_book_title,
};
use tracing::info;

use crate::{
    book::repository::{BookRecordInsert, BookRepositoryArc},
    error::AppResult,
};

pub const BOOK_RESOURCE_NAME: &str = "book";

#[derive(Debug, Clone)]
pub struct RegisterBookCommand {
    book_repository: BookRepositoryArc,
}

#[derive(Debug, Clone)]
pub struct RegisterBookCommandInput<'a> {
    pub title: &'a str,
    pub author_id: AuthorId,
}

#[derive(Debug, Clone)]
pub struct RegisterBookCommandOutput {
    pub book: BookModel,
}

impl RegisterBookCommand {
    pub fn new(book_repository: BookRepositoryArc) -> Self {
        RegisterBookCommand { book_repository }
    }

    /// Registers a book against an existing author.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank or overlong title, or `NotFound`
    /// if the author does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        input: RegisterBookCommandInput<'_>,
    ) -> AppResult<RegisterBookCommandOutput> {
        let title = input.title.trim();
        let violations = validate_book_title(title);
        if !violations.is_empty() {
            return Err(LibraryError::validation(BOOK_RESOURCE_NAME, violations).into());
        }

        let record = self
            .book_repository
            .insert(BookRecordInsert {
                title: title.to_string(),
                author_id: input.author_id,
            })
            .await?;

        info!(book_id = %record.id, author_id = %record.author_id, "Registered book");

        Ok(RegisterBookCommandOutput {
            book: record.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{NaiveDate, Utc};
    use libraryapi_model::model::error::CommonError;

    use crate::{
        author::repository::AuthorRecordOwned,
        book::repository::{BookRepository, memory::MemoryBookRepository},
        database::memory::MemoryDatabase,
    };

    use super::*;

    fn setup() -> (RegisterBookCommand, Arc<MemoryBookRepository>, AuthorId) {
        let author = AuthorRecordOwned {
            id: AuthorId::generate(),
            create_time: Utc::now(),
            name: "Juan Rulfo".into(),
            birth_date: NaiveDate::from_ymd_opt(1917, 5, 16).unwrap(),
            nationality: "Mexicana".into(),
        };
        let author_id = author.id;
        let repository = Arc::new(MemoryBookRepository::new(MemoryDatabase::with_data(
            vec![author],
            vec![],
        )));
        (
            RegisterBookCommand::new(repository.clone()),
            repository,
            author_id,
        )
    }

    #[tokio::test]
    async fn register() {
        let (command, repository, author_id) = setup();
        let output = command
            .execute(RegisterBookCommandInput {
                title: "  Pedro Páramo ",
                author_id,
            })
            .await
            .unwrap();
        assert_eq!(output.book.title, "Pedro Páramo");
        assert_eq!(output.book.author_id, author_id);
        assert!(repository.exists_by_author(&author_id).await.unwrap());
    }

    #[tokio::test]
    async fn reject_blank_title() {
        let (command, repository, author_id) = setup();
        let err = command
            .execute(RegisterBookCommandInput {
                title: " ",
                author_id,
            })
            .await
            .unwrap_err();
        assert_eq!(
            err.as_library().unwrap().violations()[0].error,
            CommonError::RequiredFieldMissing
        );
        assert!(!repository.exists_by_author(&author_id).await.unwrap());
    }
}
