use async_trait::async_trait;
use chrono::Utc;
use libraryapi_model::model::{author::AuthorId, error::LibraryError, search::AuthorQuery};
use rusqlite::{OptionalExtension, Row, TransactionBehavior, params, params_from_iter};

use crate::{
    author::repository::{
        AuthorDeleteOutcome, AuthorRecordInsert, AuthorRecordOwned, AuthorRecordUpdate,
        AuthorRepository,
    },
    database::sqlite::{
        AUTHOR_EXISTS_SQL, BOOK_EXISTS_BY_AUTHOR_SQL, CONTAINS_IGNORE_CASE_FUNCTION,
        SqliteDatabase, get_ulid, is_unique_violation,
    },
    error::AppResult,
};

const SELECT_AUTHORS_SQL: &str =
    "SELECT id, name, birth_date, nationality, create_time FROM authors";

/// `SQLite` implementation of the author repository.
#[derive(Debug, Clone)]
pub struct SqliteAuthorRepository {
    database: SqliteDatabase,
}

impl SqliteAuthorRepository {
    pub fn new(database: SqliteDatabase) -> Self {
        Self { database }
    }
}

fn author_from_row(row: &Row<'_>) -> rusqlite::Result<AuthorRecordOwned> {
    Ok(AuthorRecordOwned {
        id: AuthorId(get_ulid(row, 0)?),
        name: row.get(1)?,
        birth_date: row.get(2)?,
        nationality: row.get(3)?,
        create_time: row.get(4)?,
    })
}

/// Renders the `WHERE` clause of a query and its positional arguments.
fn build_filter(query: &AuthorQuery) -> (String, Vec<String>) {
    let mut conditions = Vec::new();
    let mut arguments = Vec::new();
    let mut push = |condition: String, argument: &str| {
        arguments.push(argument.to_string());
        conditions.push(condition.replace('?', &format!("?{}", arguments.len())));
    };

    match query {
        AuthorQuery::All => {}
        AuthorQuery::ByName(name) => push("name = ?".into(), name),
        AuthorQuery::ByNationality(nationality) => push("nationality = ?".into(), nationality),
        AuthorQuery::ByNameAndNationality { name, nationality } => {
            push("name = ?".into(), name);
            push("nationality = ?".into(), nationality);
        }
        AuthorQuery::Example(example) => {
            if let Some(name) = example.name.as_deref() {
                push(format!("{CONTAINS_IGNORE_CASE_FUNCTION}(name, ?)"), name);
            }
            if let Some(nationality) = example.nationality.as_deref() {
                push(
                    format!("{CONTAINS_IGNORE_CASE_FUNCTION}(nationality, ?)"),
                    nationality,
                );
            }
        }
    }

    if conditions.is_empty() {
        (String::new(), arguments)
    } else {
        (format!(" WHERE {}", conditions.join(" AND ")), arguments)
    }
}

#[async_trait]
impl AuthorRepository for SqliteAuthorRepository {
    async fn insert(&self, record: AuthorRecordInsert) -> AppResult<AuthorRecordOwned> {
        let author = AuthorRecordOwned {
            id: AuthorId::generate(),
            create_time: Utc::now(),
            name: record.name,
            birth_date: record.birth_date,
            nationality: record.nationality,
        };

        self.database
            .run(move |connection| {
                let inserted = connection.execute(
                    "INSERT INTO authors (id, name, birth_date, nationality, create_time) \
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        author.id.0.to_string(),
                        author.name,
                        author.birth_date,
                        author.nationality,
                        author.create_time,
                    ],
                );
                match inserted {
                    Ok(_) => Ok(author),
                    Err(err) if is_unique_violation(&err) => {
                        Err(LibraryError::already_exists("author").into())
                    }
                    Err(err) => Err(err.into()),
                }
            })
            .await
    }

    async fn update(&self, update: AuthorRecordUpdate<'_>) -> AppResult<bool> {
        let id = update.id.0.to_string();
        let name = update.name.to_string();
        let birth_date = update.birth_date;
        let nationality = update.nationality.to_string();

        self.database
            .run(move |connection| {
                let updated = connection.execute(
                    "UPDATE authors SET name = ?2, birth_date = ?3, nationality = ?4 \
                     WHERE id = ?1",
                    params![id, name, birth_date, nationality],
                );
                match updated {
                    Ok(count) => Ok(count > 0),
                    Err(err) if is_unique_violation(&err) => {
                        Err(LibraryError::already_exists("author").into())
                    }
                    Err(err) => Err(err.into()),
                }
            })
            .await
    }

    async fn select(&self, id: &AuthorId) -> AppResult<Option<AuthorRecordOwned>> {
        let id = id.0.to_string();
        self.database
            .run(move |connection| {
                Ok(connection
                    .query_row(
                        &format!("{SELECT_AUTHORS_SQL} WHERE id = ?1"),
                        params![id],
                        author_from_row,
                    )
                    .optional()?)
            })
            .await
    }

    async fn select_filtered(&self, query: &AuthorQuery) -> AppResult<Vec<AuthorRecordOwned>> {
        let (filter, arguments) = build_filter(query);
        self.database
            .run(move |connection| {
                let mut statement = connection.prepare(&format!(
                    "{SELECT_AUTHORS_SQL}{filter} ORDER BY name, id"
                ))?;
                let authors = statement
                    .query_map(params_from_iter(arguments.iter()), author_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(authors)
            })
            .await
    }

    async fn delete_unreferenced(&self, id: &AuthorId) -> AppResult<AuthorDeleteOutcome> {
        let id = id.0.to_string();
        self.database
            .run(move |connection| {
                // IMMEDIATE takes the write lock up front, so no book can be
                // inserted between the check and the delete.
                let transaction =
                    connection.transaction_with_behavior(TransactionBehavior::Immediate)?;

                let exists: bool =
                    transaction.query_row(AUTHOR_EXISTS_SQL, params![id], |row| row.get(0))?;
                if !exists {
                    return Ok(AuthorDeleteOutcome::NotFound);
                }
                let referenced: bool = transaction.query_row(
                    BOOK_EXISTS_BY_AUTHOR_SQL,
                    params![id],
                    |row| row.get(0),
                )?;
                if referenced {
                    return Ok(AuthorDeleteOutcome::Referenced);
                }

                transaction.execute("DELETE FROM authors WHERE id = ?1", params![id])?;
                transaction.commit()?;
                Ok(AuthorDeleteOutcome::Deleted)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use libraryapi_model::model::search::SearchCriteria;

    use super::*;

    #[test]
    fn render_filters() {
        assert_eq!(build_filter(&AuthorQuery::All), (String::new(), vec![]));
        assert_eq!(
            build_filter(&AuthorQuery::ByNameAndNationality {
                name: "Ana".into(),
                nationality: "Chilena".into(),
            }),
            (
                " WHERE name = ?1 AND nationality = ?2".to_string(),
                vec!["Ana".to_string(), "Chilena".to_string()]
            )
        );
        assert_eq!(
            build_filter(&AuthorQuery::example(
                &SearchCriteria::default().with_nationality("ile")
            )),
            (
                " WHERE contains_ignore_case(nationality, ?1)".to_string(),
                vec!["ile".to_string()]
            )
        );
        assert_eq!(
            build_filter(&AuthorQuery::example(&SearchCriteria::default())),
            (String::new(), vec![])
        );
    }
}
