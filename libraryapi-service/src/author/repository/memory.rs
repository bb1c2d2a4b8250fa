use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use itertools::Itertools;
use libraryapi_model::model::{author::AuthorId, error::LibraryError, search::AuthorQuery};

use crate::{
    author::repository::{
        AuthorDeleteOutcome, AuthorRecordInsert, AuthorRecordOwned, AuthorRecordUpdate,
        AuthorRepository,
    },
    database::memory::{MemoryDatabase, MemoryState},
    error::AppResult,
};

/// In-memory implementation of the author repository.
#[derive(Debug, Clone)]
pub struct MemoryAuthorRepository {
    database: MemoryDatabase,
}

impl MemoryAuthorRepository {
    pub fn new(database: MemoryDatabase) -> Self {
        Self { database }
    }
}

fn has_duplicate(
    state: &MemoryState,
    id: Option<&AuthorId>,
    name: &str,
    birth_date: NaiveDate,
    nationality: &str,
) -> bool {
    state.authors.values().any(|author| {
        Some(&author.id) != id
            && author.name == name
            && author.birth_date == birth_date
            && author.nationality == nationality
    })
}

#[async_trait]
impl AuthorRepository for MemoryAuthorRepository {
    async fn insert(&self, record: AuthorRecordInsert) -> AppResult<AuthorRecordOwned> {
        let mut state = self.database.write().await;
        if has_duplicate(
            &state,
            None,
            &record.name,
            record.birth_date,
            &record.nationality,
        ) {
            return Err(LibraryError::already_exists("author").into());
        }

        let author = AuthorRecordOwned {
            id: AuthorId::generate(),
            create_time: Utc::now(),
            name: record.name,
            birth_date: record.birth_date,
            nationality: record.nationality,
        };
        state.authors.insert(author.id, author.clone());
        Ok(author)
    }

    async fn update(&self, update: AuthorRecordUpdate<'_>) -> AppResult<bool> {
        let mut state = self.database.write().await;
        if !state.authors.contains_key(update.id) {
            return Ok(false);
        }
        if has_duplicate(
            &state,
            Some(update.id),
            update.name,
            update.birth_date,
            update.nationality,
        ) {
            return Err(LibraryError::already_exists("author").into());
        }

        if let Some(author) = state.authors.get_mut(update.id) {
            author.name = update.name.to_string();
            author.birth_date = update.birth_date;
            author.nationality = update.nationality.to_string();
        }
        Ok(true)
    }

    async fn select(&self, id: &AuthorId) -> AppResult<Option<AuthorRecordOwned>> {
        let state = self.database.read().await;
        Ok(state.authors.get(id).cloned())
    }

    async fn select_filtered(&self, query: &AuthorQuery) -> AppResult<Vec<AuthorRecordOwned>> {
        let state = self.database.read().await;
        Ok(state
            .authors
            .values()
            .filter(|author| query.matches(*author))
            .sorted_unstable_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)))
            .cloned()
            .collect())
    }

    async fn delete_unreferenced(&self, id: &AuthorId) -> AppResult<AuthorDeleteOutcome> {
        let mut state = self.database.write().await;
        if !state.authors.contains_key(id) {
            return Ok(AuthorDeleteOutcome::NotFound);
        }
        if state.has_books(id) {
            return Ok(AuthorDeleteOutcome::Referenced);
        }
        state.authors.remove(id);
        Ok(AuthorDeleteOutcome::Deleted)
    }
}
