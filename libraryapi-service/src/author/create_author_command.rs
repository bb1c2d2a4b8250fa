use libraryapi_model::model::author::AuthorModel;
use tracing::{debug, info};

use crate::{
    author::{
        repository::{AuthorRecordInsert, AuthorRepositoryArc},
        validator::AuthorValidator,
    },
    error::AppResult,
};

/// Command for creating new authors.
///
/// Validates the author before anything is persisted. The repository assigns
/// the identifier.
#[derive(Debug, Clone)]
pub struct CreateAuthorCommand {
    author_repository: AuthorRepositoryArc,
    validator: AuthorValidator,
}

/// Output data from author creation.
#[derive(Debug, Clone)]
pub struct CreateAuthorCommandOutput {
    /// The created author model
    pub author: AuthorModel,
}

impl CreateAuthorCommand {
    /// Creates a new `CreateAuthorCommand`.
    ///
    /// # Arguments
    ///
    /// * `author_repository` - Repository for persisting author data
    pub fn new(author_repository: AuthorRepositoryArc) -> Self {
        Self {
            author_repository,
            validator: AuthorValidator::new(),
        }
    }

    /// Executes the author creation command.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any field is invalid, `AlreadyExists` if
    /// the same author is already stored, or an internal error if persistence
    /// fails.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, author: AuthorModel) -> AppResult<CreateAuthorCommandOutput> {
        if let Some(id) = &author.id {
            debug!(author_id = %id, "Ignoring identifier supplied for a new author");
        }
        let author = author.trimmed();

        info!(name = %author.name, "Creating author");

        self.validator.validate(&author)?;

        let record = self
            .author_repository
            .insert(AuthorRecordInsert {
                name: author.name,
                birth_date: author.birth_date,
                nationality: author.nationality,
            })
            .await?;

        info!(author_id = %record.id, "Successfully created author");

        Ok(CreateAuthorCommandOutput {
            author: record.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Days, NaiveDate, Utc};
    use libraryapi_model::model::{
        author::AuthorId,
        error::{CommonError, LibraryError},
        search::AuthorQuery,
    };

    use crate::{
        author::repository::{AuthorRepository, memory::MemoryAuthorRepository},
        database::memory::MemoryDatabase,
    };

    use super::*;

    fn setup() -> (CreateAuthorCommand, Arc<MemoryAuthorRepository>) {
        let repository = Arc::new(MemoryAuthorRepository::new(MemoryDatabase::new()));
        (CreateAuthorCommand::new(repository.clone()), repository)
    }

    #[tokio::test]
    async fn create() {
        let (command, repository) = setup();
        let supplied_id = AuthorId::generate();
        let output = command
            .execute(
                AuthorModel::new(
                    " Gabriela Mistral ",
                    NaiveDate::from_ymd_opt(1889, 4, 7).unwrap(),
                    "Chilena",
                )
                .with_id(supplied_id),
            )
            .await
            .unwrap();

        let id = output.author.id.unwrap();
        assert_ne!(id, supplied_id);
        assert_eq!(output.author.name, "Gabriela Mistral");
        assert!(output.author.create_time.is_some());

        let stored: AuthorModel = repository.select(&id).await.unwrap().unwrap().into();
        assert_eq!(stored, output.author);
    }

    #[tokio::test]
    async fn reject_birth_date_not_in_past() {
        let (command, repository) = setup();
        let today = Utc::now().date_naive();

        for birth_date in [today, today.checked_add_days(Days::new(30)).unwrap()] {
            let err = command
                .execute(AuthorModel::new("Futuro", birth_date, "Chilena"))
                .await
                .unwrap_err();
            assert_eq!(err.as_library().unwrap().violations().len(), 1);
            assert_eq!(
                err.as_library().unwrap().violations()[0].error,
                CommonError::NotInPast
            );
        }

        assert!(
            repository
                .select_filtered(&AuthorQuery::All)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn reject_duplicate() {
        let (command, _) = setup();
        let author = AuthorModel::new(
            "Pablo Neruda",
            NaiveDate::from_ymd_opt(1904, 7, 12).unwrap(),
            "Chilena",
        );
        command.execute(author.clone()).await.unwrap();
        assert!(matches!(
            command.execute(author).await.unwrap_err().as_library(),
            Some(LibraryError::AlreadyExists { .. })
        ));
    }
}
