use libraryapi_model::model::{
    author::{AuthorId, AuthorModel},
    search::{AuthorQuery, SearchCriteria},
};
use tracing::debug;

use crate::{author::repository::AuthorRepositoryArc, error::AppResult};

#[derive(Debug)]
pub struct AuthorQueryManager {
    author_repository: AuthorRepositoryArc,
}

impl AuthorQueryManager {
    pub fn new(author_repository: AuthorRepositoryArc) -> Self {
        AuthorQueryManager { author_repository }
    }

    pub async fn query(&self, id: &AuthorId) -> AppResult<Option<AuthorModel>> {
        Ok(self.author_repository.select(id).await?.map(Into::into))
    }

    /// Exact-match search.
    ///
    /// Both criteria present match both values, one present matches that
    /// value alone, and none present returns every author.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, criteria: &SearchCriteria) -> AppResult<Vec<AuthorModel>> {
        self.query_list(&AuthorQuery::strict(criteria)).await
    }

    /// Case-insensitive containment search over the supplied criteria.
    #[tracing::instrument(skip(self))]
    pub async fn search_by_example(
        &self,
        criteria: &SearchCriteria,
    ) -> AppResult<Vec<AuthorModel>> {
        self.query_list(&AuthorQuery::example(criteria)).await
    }

    pub async fn query_list(&self, query: &AuthorQuery) -> AppResult<Vec<AuthorModel>> {
        let authors = self.author_repository.select_filtered(query).await?;
        debug!(count = authors.len(), "Selected authors");
        Ok(authors.into_iter().map(AuthorModel::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{NaiveDate, Utc};

    use crate::{
        author::repository::{AuthorRecordOwned, memory::MemoryAuthorRepository},
        database::memory::MemoryDatabase,
    };

    use super::*;

    fn author(name: &str, nationality: &str) -> AuthorRecordOwned {
        AuthorRecordOwned {
            id: AuthorId::generate(),
            create_time: Utc::now(),
            name: name.into(),
            birth_date: NaiveDate::from_ymd_opt(1960, 3, 1).unwrap(),
            nationality: nationality.into(),
        }
    }

    fn manager() -> AuthorQueryManager {
        let repository = MemoryAuthorRepository::new(MemoryDatabase::with_data(
            vec![
                author("Ana", "Chilena"),
                author("Juan", "Mexicana"),
                author("Beto", "Chilena"),
            ],
            vec![],
        ));
        AuthorQueryManager::new(Arc::new(repository))
    }

    fn names(authors: &[AuthorModel]) -> Vec<&str> {
        authors.iter().map(|author| author.name.as_str()).collect()
    }

    #[tokio::test]
    async fn search() {
        let manager = manager();

        let found = manager
            .search(&SearchCriteria::default().with_nationality("Chilena"))
            .await
            .unwrap();
        assert_eq!(names(&found), ["Ana", "Beto"]);

        let found = manager
            .search(&SearchCriteria::new(Some("Ana"), Some("Chilena")))
            .await
            .unwrap();
        assert_eq!(names(&found), ["Ana"]);

        // Exact matching is case-sensitive.
        let found = manager
            .search(&SearchCriteria::default().with_name("ana"))
            .await
            .unwrap();
        assert!(found.is_empty());

        let found = manager
            .search(&SearchCriteria::new(Some("  "), None::<String>))
            .await
            .unwrap();
        assert_eq!(found.len(), 3);
    }

    #[tokio::test]
    async fn search_by_example() {
        let manager = manager();

        let found = manager
            .search_by_example(&SearchCriteria::default().with_name("AN"))
            .await
            .unwrap();
        assert_eq!(names(&found), ["Ana", "Juan"]);

        let found = manager
            .search_by_example(&SearchCriteria::new(Some("an"), Some("chil")))
            .await
            .unwrap();
        assert_eq!(names(&found), ["Ana"]);

        let found = manager
            .search_by_example(&SearchCriteria::default())
            .await
            .unwrap();
        assert_eq!(found.len(), 3);
    }

    #[tokio::test]
    async fn query() {
        let ana = author("Ana", "Chilena");
        let manager = AuthorQueryManager::new(Arc::new(MemoryAuthorRepository::new(
            MemoryDatabase::with_data(vec![ana.clone()], vec![]),
        )));
        let id = ana.id;
        assert_eq!(
            manager.query(&id).await.unwrap(),
            Some(AuthorModel::from(ana))
        );
        assert_eq!(manager.query(&AuthorId::generate()).await.unwrap(), None);
    }
}
