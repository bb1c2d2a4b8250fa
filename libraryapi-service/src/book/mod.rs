//! Book management module.
//!
//! Books exist to reference authors. Registering one against an author keeps
//! that author from being deleted until the book is removed.

/// Book service adapter.
pub mod adapter;

/// Book deletion command handler.
pub mod delete_book_command;

/// Book registration command handler.
pub mod register_book_command;

/// Book repository abstraction and implementations.
pub mod repository;
