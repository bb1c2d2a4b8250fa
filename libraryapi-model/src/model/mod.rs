pub mod author;
pub mod book;
pub mod error;
pub mod search;
pub mod validation;
