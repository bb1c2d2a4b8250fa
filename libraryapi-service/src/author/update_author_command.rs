use libraryapi_model::model::{author::AuthorModel, error::LibraryError};
use tracing::info;

use crate::{
    author::{
        repository::{AuthorRecordUpdate, AuthorRepositoryArc},
        validator::AuthorValidator,
    },
    error::{AppError, AppResult},
};

#[derive(Debug, Clone)]
pub struct UpdateAuthorCommand {
    author_repository: AuthorRepositoryArc,
    validator: AuthorValidator,
}

#[derive(Debug, Clone)]
pub struct UpdateAuthorCommandOutput {
    pub author: AuthorModel,
}

impl UpdateAuthorCommand {
    pub fn new(author_repository: AuthorRepositoryArc) -> Self {
        UpdateAuthorCommand {
            author_repository,
            validator: AuthorValidator::new(),
        }
    }

    /// Overwrites the stored author with the given values.
    ///
    /// The id is checked before anything else, so an author without one never
    /// reaches validation or the repository.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the author has no id, a validation error if
    /// any field is invalid, `NotFound` if no author has that id, or
    /// `AlreadyExists` if the values collide with another author.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, author: AuthorModel) -> AppResult<UpdateAuthorCommandOutput> {
        let id = author.id.ok_or_else(|| {
            LibraryError::InvalidArgument("identifier required for update".into())
        })?;
        let author = author.trimmed();

        self.validator.validate(&author)?;

        let record = AuthorRecordUpdate {
            id: &id,
            name: &author.name,
            birth_date: author.birth_date,
            nationality: &author.nationality,
        };
        if !self.author_repository.update(record).await? {
            return Err(LibraryError::not_found(id).into());
        }

        info!(author_id = %id, "Updated author");

        let updated = self
            .author_repository
            .select(&id)
            .await?
            .ok_or_else(|| AppError::from(LibraryError::not_found(id)))?;

        Ok(UpdateAuthorCommandOutput {
            author: updated.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{NaiveDate, Utc};
    use libraryapi_model::model::{author::AuthorId, error::CommonError};

    use crate::{
        author::repository::{AuthorRecordInsert, AuthorRepository, memory::MemoryAuthorRepository},
        database::memory::MemoryDatabase,
    };

    use super::*;

    async fn setup() -> (UpdateAuthorCommand, Arc<MemoryAuthorRepository>, AuthorModel) {
        let repository = Arc::new(MemoryAuthorRepository::new(MemoryDatabase::new()));
        let stored = repository
            .insert(AuthorRecordInsert {
                name: "Isabel Allende".into(),
                birth_date: NaiveDate::from_ymd_opt(1942, 8, 2).unwrap(),
                nationality: "Chilena".into(),
            })
            .await
            .unwrap();
        (
            UpdateAuthorCommand::new(repository.clone()),
            repository,
            stored.into(),
        )
    }

    #[tokio::test]
    async fn update() {
        let (command, repository, author) = setup().await;
        let id = author.id.unwrap();

        let changed = AuthorModel {
            nationality: " Chilena-Estadounidense ".into(),
            ..author.clone()
        };
        let output = command.execute(changed).await.unwrap();
        assert_eq!(output.author.nationality, "Chilena-Estadounidense");
        assert_eq!(output.author.create_time, author.create_time);

        // Applying the same values again leaves the record unchanged.
        let again = command.execute(output.author.clone()).await.unwrap();
        assert_eq!(again.author, output.author);

        let stored: AuthorModel = repository.select(&id).await.unwrap().unwrap().into();
        assert_eq!(stored, output.author);
    }

    #[tokio::test]
    async fn require_id() {
        let (command, _, author) = setup().await;
        // Invalid fields too, to show the id check comes first.
        let author = AuthorModel {
            id: None,
            name: String::new(),
            ..author
        };
        assert!(matches!(
            command.execute(author).await.unwrap_err().as_library(),
            Some(LibraryError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn reject_invalid_without_persisting() {
        let (command, repository, author) = setup().await;
        let id = author.id.unwrap();
        let tomorrow = Utc::now().date_naive().succ_opt().unwrap();

        let err = command
            .execute(AuthorModel {
                name: "   ".into(),
                birth_date: tomorrow,
                ..author.clone()
            })
            .await
            .unwrap_err();
        let violations = err.as_library().unwrap().violations();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].error, CommonError::RequiredFieldMissing);
        assert_eq!(violations[1].error, CommonError::NotInPast);

        let stored: AuthorModel = repository.select(&id).await.unwrap().unwrap().into();
        assert_eq!(stored, author);
    }

    #[tokio::test]
    async fn unknown_id() {
        let (command, _, author) = setup().await;
        let author = author.with_id(AuthorId::generate());
        assert!(matches!(
            command.execute(author).await.unwrap_err().as_library(),
            Some(LibraryError::NotFound { .. })
        ));
    }
}
