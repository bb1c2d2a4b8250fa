use libraryapi_model::model::{
    author::{AuthorId, AuthorModel},
    error::LibraryError,
    search::SearchCriteria,
};

use crate::{
    author::{
        create_author_command::CreateAuthorCommand, delete_author_command::DeleteAuthorCommand,
        query_manager::AuthorQueryManager, repository::AuthorRepositoryArc,
        update_author_command::UpdateAuthorCommand,
    },
    error::AppResult,
};

/// Entry point for author operations.
#[derive(Debug)]
pub struct AuthorAdapter {
    author_query_manager: AuthorQueryManager,
    create_author_command: CreateAuthorCommand,
    update_author_command: UpdateAuthorCommand,
    delete_author_command: DeleteAuthorCommand,
}

impl AuthorAdapter {
    pub fn new(
        author_query_manager: AuthorQueryManager,
        author_repository: AuthorRepositoryArc,
    ) -> Self {
        AuthorAdapter {
            author_query_manager,
            create_author_command: CreateAuthorCommand::new(author_repository.clone()),
            update_author_command: UpdateAuthorCommand::new(author_repository.clone()),
            delete_author_command: DeleteAuthorCommand::new(author_repository),
        }
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no author has that id.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: &AuthorId) -> AppResult<AuthorModel> {
        self.author_query_manager
            .query(id)
            .await?
            .ok_or_else(|| LibraryError::not_found(id).into())
    }

    #[tracing::instrument(skip(self))]
    pub async fn search(
        &self,
        name: Option<&str>,
        nationality: Option<&str>,
    ) -> AppResult<Vec<AuthorModel>> {
        self.author_query_manager
            .search(&SearchCriteria::new(name, nationality))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn search_by_example(
        &self,
        name: Option<&str>,
        nationality: Option<&str>,
    ) -> AppResult<Vec<AuthorModel>> {
        self.author_query_manager
            .search_by_example(&SearchCriteria::new(name, nationality))
            .await
    }

    /// Validates and stores a new author, returning it with its assigned id.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, author: AuthorModel) -> AppResult<AuthorModel> {
        Ok(self.create_author_command.execute(author).await?.author)
    }

    /// Overwrites an existing author.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, author: AuthorModel) -> AppResult<()> {
        self.update_author_command.execute(author).await?;
        Ok(())
    }

    /// Deletes an author. Only the id of `author` is used.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the author has no id, and otherwise the
    /// errors of the guarded delete.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, author: &AuthorModel) -> AppResult<()> {
        let id = author.id.ok_or_else(|| {
            LibraryError::InvalidArgument("identifier required for delete".into())
        })?;
        self.delete_author_command.execute(id).await
    }
}
