use std::{
    fmt::{self, Debug, Formatter},
    os::raw::c_int,
    path::Path,
    sync::{Arc, Mutex},
};

use libraryapi_model::model::search::contains_ignore_case;
use rusqlite::{Connection, Row, ffi, functions::FunctionFlags, types::Type};
use tokio::task;
use ulid::Ulid;

use crate::error::{AppError, AppResult};

/// Name of the scalar function implementing case-insensitive containment.
pub const CONTAINS_IGNORE_CASE_FUNCTION: &str = "contains_ignore_case";

/// Referential check shared by the author guard and the book repository.
pub const BOOK_EXISTS_BY_AUTHOR_SQL: &str =
    "SELECT EXISTS (SELECT 1 FROM books WHERE author_id = ?1)";

pub const AUTHOR_EXISTS_SQL: &str = "SELECT EXISTS (SELECT 1 FROM authors WHERE id = ?1)";

const SCHEMA_SQL: &str = r"
CREATE TABLE IF NOT EXISTS authors (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    birth_date TEXT NOT NULL,
    nationality TEXT NOT NULL,
    create_time TEXT NOT NULL,
    UNIQUE (name, birth_date, nationality)
);
CREATE INDEX IF NOT EXISTS authors_nationality_idx ON authors (nationality);

CREATE TABLE IF NOT EXISTS books (
    id TEXT PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    author_id TEXT NOT NULL REFERENCES authors (id) ON DELETE RESTRICT,
    create_time TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS books_author_id_idx ON books (author_id);
";

/// `SQLite` database shared by the `SQLite` repositories.
///
/// Holds a single connection. Statements run on the blocking thread pool, one
/// closure at a time, and a closure may open a transaction spanning several
/// statements.
#[derive(Clone)]
pub struct SqliteDatabase {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteDatabase {
    /// Opens or creates a database file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or the schema cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        Self::setup(Connection::open(path)?)
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub fn open_in_memory() -> AppResult<Self> {
        Self::setup(Connection::open_in_memory()?)
    }

    fn setup(connection: Connection) -> AppResult<Self> {
        connection.pragma_update(None, "foreign_keys", "ON")?;
        connection.execute_batch(SCHEMA_SQL)?;
        connection.create_scalar_function(
            CONTAINS_IGNORE_CASE_FUNCTION,
            2,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |context| {
                let haystack = context.get::<String>(0)?;
                let needle = context.get::<String>(1)?;
                Ok(contains_ignore_case(&haystack, &needle))
            },
        )?;

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Runs `f` with exclusive access to the connection.
    ///
    /// # Errors
    ///
    /// Returns the error of `f`, or an internal error if the blocking task fails.
    pub async fn run<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut Connection) -> AppResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let connection = Arc::clone(&self.connection);
        task::spawn_blocking(move || {
            let mut connection = connection
                .lock()
                .map_err(|_| AppError::internal("sqlite connection lock poisoned"))?;
            f(&mut connection)
        })
        .await?
    }
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteDatabase").finish_non_exhaustive()
    }
}

/// Reads a ULID stored as text.
pub fn get_ulid(row: &Row<'_>, index: usize) -> rusqlite::Result<Ulid> {
    let value: String = row.get(index)?;
    Ulid::from_string(&value)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(err)))
}

pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    is_constraint_violation(err, ffi::SQLITE_CONSTRAINT_UNIQUE)
}

fn is_constraint_violation(err: &rusqlite::Error, extended_code: c_int) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _) if failure.extended_code == extended_code
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn contains_ignore_case_function() {
        let database = SqliteDatabase::open_in_memory().unwrap();
        let matched = database
            .run(|connection| {
                Ok(connection.query_row(
                    "SELECT contains_ignore_case('Érico Veríssimo', 'VERÍS'), \
                            contains_ignore_case('Beto', 'an')",
                    [],
                    |row| Ok((row.get::<_, bool>(0)?, row.get::<_, bool>(1)?)),
                )?)
            })
            .await
            .unwrap();
        assert_eq!(matched, (true, false));
    }

    #[tokio::test]
    async fn open_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.db");
        SqliteDatabase::open(&path).unwrap();
        // Reopening keeps the existing schema.
        let database = SqliteDatabase::open(&path).unwrap();
        let count = database
            .run(|connection| {
                Ok(connection.query_row("SELECT COUNT(*) FROM authors", [], |row| {
                    row.get::<_, i64>(0)
                })?)
            })
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
