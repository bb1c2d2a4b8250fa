use async_trait::async_trait;
use chrono::Utc;
use libraryapi_model::model::{author::AuthorId, book::BookId, error::LibraryError};
use rusqlite::{OptionalExtension, Row, TransactionBehavior, params};

use crate::{
    book::repository::{BookRecordInsert, BookRecordOwned, BookRepository},
    database::sqlite::{AUTHOR_EXISTS_SQL, BOOK_EXISTS_BY_AUTHOR_SQL, SqliteDatabase, get_ulid},
    error::AppResult,
};

const SELECT_BOOKS_SQL: &str = "SELECT id, title, author_id, create_time FROM books";

/// `SQLite` implementation of the book repository.
#[derive(Debug, Clone)]
pub struct SqliteBookRepository {
    database: SqliteDatabase,
}

impl SqliteBookRepository {
    pub fn new(database: SqliteDatabase) -> Self {
        Self { database }
    }
}

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<BookRecordOwned> {
    Ok(BookRecordOwned {
        id: BookId(get_ulid(row, 0)?),
        title: row.get(1)?,
        author_id: AuthorId(get_ulid(row, 2)?),
        create_time: row.get(3)?,
    })
}

#[async_trait]
impl BookRepository for SqliteBookRepository {
    async fn insert(&self, record: BookRecordInsert) -> AppResult<BookRecordOwned> {
        let book = BookRecordOwned {
            id: BookId::generate(),
            create_time: Utc::now(),
            title: record.title,
            author_id: record.author_id,
        };

        self.database
            .run(move |connection| {
                let transaction =
                    connection.transaction_with_behavior(TransactionBehavior::Immediate)?;

                let author_id = book.author_id.0.to_string();
                let exists: bool =
                    transaction.query_row(AUTHOR_EXISTS_SQL, params![author_id], |row| {
                        row.get(0)
                    })?;
                if !exists {
                    return Err(LibraryError::not_found(book.author_id).into());
                }

                transaction.execute(
                    "INSERT INTO books (id, title, author_id, create_time) \
                     VALUES (?1, ?2, ?3, ?4)",
                    params![book.id.0.to_string(), book.title, author_id, book.create_time],
                )?;
                transaction.commit()?;
                Ok(book)
            })
            .await
    }

    async fn select(&self, id: &BookId) -> AppResult<Option<BookRecordOwned>> {
        let id = id.0.to_string();
        self.database
            .run(move |connection| {
                Ok(connection
                    .query_row(
                        &format!("{SELECT_BOOKS_SQL} WHERE id = ?1"),
                        params![id],
                        book_from_row,
                    )
                    .optional()?)
            })
            .await
    }

    async fn select_by_author(&self, author_id: &AuthorId) -> AppResult<Vec<BookRecordOwned>> {
        let author_id = author_id.0.to_string();
        self.database
            .run(move |connection| {
                let mut statement = connection.prepare(&format!(
                    "{SELECT_BOOKS_SQL} WHERE author_id = ?1 ORDER BY title, id"
                ))?;
                let books = statement
                    .query_map(params![author_id], book_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(books)
            })
            .await
    }

    async fn exists_by_author(&self, author_id: &AuthorId) -> AppResult<bool> {
        let author_id = author_id.0.to_string();
        self.database
            .run(move |connection| {
                Ok(connection.query_row(BOOK_EXISTS_BY_AUTHOR_SQL, params![author_id], |row| {
                    row.get(0)
                })?)
            })
            .await
    }

    async fn delete(&self, id: &BookId) -> AppResult<bool> {
        let id = id.0.to_string();
        self.database
            .run(move |connection| {
                Ok(connection.execute("DELETE FROM books WHERE id = ?1", params![id])? > 0)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::author::repository::{
        AuthorDeleteOutcome, AuthorRecordInsert, AuthorRepository,
        sqlite::SqliteAuthorRepository,
    };

    use super::*;

    #[tokio::test]
    async fn it_works() {
        let database = SqliteDatabase::open_in_memory().unwrap();
        let authors = SqliteAuthorRepository::new(database.clone());
        let books = SqliteBookRepository::new(database);

        let author = authors
            .insert(AuthorRecordInsert {
                name: "Mario Benedetti".into(),
                birth_date: NaiveDate::from_ymd_opt(1920, 9, 14).unwrap(),
                nationality: "Uruguaya".into(),
            })
            .await
            .unwrap();

        let book = books
            .insert(BookRecordInsert {
                title: "La tregua".into(),
                author_id: author.id,
            })
            .await
            .unwrap();
        assert_eq!(books.select(&book.id).await.unwrap(), Some(book.clone()));
        assert_eq!(
            books.select_by_author(&author.id).await.unwrap(),
            vec![book.clone()]
        );
        assert!(books.exists_by_author(&author.id).await.unwrap());
        assert_eq!(
            authors.delete_unreferenced(&author.id).await.unwrap(),
            AuthorDeleteOutcome::Referenced
        );

        assert!(books.delete(&book.id).await.unwrap());
        assert!(!books.exists_by_author(&author.id).await.unwrap());
        assert_eq!(
            authors.delete_unreferenced(&author.id).await.unwrap(),
            AuthorDeleteOutcome::Deleted
        );

        let err = books
            .insert(BookRecordInsert {
                title: "Gracias por el fuego".into(),
                author_id: author.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_library(), Some(LibraryError::NotFound { .. })));
    }
}
