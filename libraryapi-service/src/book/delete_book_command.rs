use libraryapi_model::model::{book::BookId, error::LibraryError};
use tracing::info;

use crate::{book::repository::BookRepositoryArc, error::AppResult};

#[derive(Debug, Clone)]
pub struct DeleteBookCommand {
    book_repository: BookRepositoryArc,
}

impl DeleteBookCommand {
    pub fn new(book_repository: BookRepositoryArc) -> Self {
        DeleteBookCommand { book_repository }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: BookId) -> AppResult<()> {
        if !self.book_repository.delete(&id).await? {
            return Err(LibraryError::not_found(id).into());
        }
        info!(book_id = %id, "Deleted book");
        Ok(())
    }
}
