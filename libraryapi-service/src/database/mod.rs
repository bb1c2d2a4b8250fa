//! Storage backends shared by the author and book repositories.
//!
//! Authors and books live in one database per backend so that checks spanning
//! both collections run inside a single atomic scope.

/// In-memory database.
pub mod memory;

/// `SQLite` database.
pub mod sqlite;
