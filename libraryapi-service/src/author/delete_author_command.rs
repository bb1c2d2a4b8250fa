use libraryapi_model::model::{author::AuthorId, error::LibraryError};
use tracing::{info, warn};

use crate::{
    author::repository::{AuthorDeleteOutcome, AuthorRepositoryArc},
    error::AppResult,
};

/// Deletes authors that no book references.
#[derive(Debug, Clone)]
pub struct DeleteAuthorCommand {
    author_repository: AuthorRepositoryArc,
}

impl DeleteAuthorCommand {
    pub fn new(author_repository: AuthorRepositoryArc) -> Self {
        DeleteAuthorCommand { author_repository }
    }

    /// # Errors
    ///
    /// Returns `OperationNotAllowed` if at least one book references the
    /// author, or `NotFound` if no author has that id.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: AuthorId) -> AppResult<()> {
        match self.author_repository.delete_unreferenced(&id).await? {
            AuthorDeleteOutcome::Deleted => {
                info!(author_id = %id, "Deleted author");
                Ok(())
            }
            AuthorDeleteOutcome::Referenced => {
                warn!(author_id = %id, "Refusing to delete author with books");
                Err(LibraryError::OperationNotAllowed(
                    "cannot delete an author with registered books".into(),
                )
                .into())
            }
            AuthorDeleteOutcome::NotFound => Err(LibraryError::not_found(id).into()),
        }
    }
}
