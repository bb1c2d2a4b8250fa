//! Author management module.
//!
//! Provides the author catalog operations:
//! - Adapter exposing search and lifecycle operations to callers
//! - Command handlers for create, update, and delete operations
//! - Query manager for strict and example searches
//! - Repository abstraction for data persistence

/// Author service adapter.
pub mod adapter;

/// Author creation command handler.
pub mod create_author_command;

/// Author deletion command handler.
pub mod delete_author_command;

/// Author query manager for data retrieval.
pub mod query_manager;

/// Author repository abstraction and implementations.
pub mod repository;

/// Author update command handler.
pub mod update_author_command;

/// Field validation shared by the create and update commands.
pub mod validator;
