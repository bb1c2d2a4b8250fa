//! # Library API model
//!
//! Domain types shared by the library service and its clients.
//!
//! - [`model::author`]: author records and identifiers
//! - [`model::book`]: book records referencing authors
//! - [`model::search`]: search criteria and the closed set of author queries
//! - [`model::validation`]: field validation for author records
//! - [`model::error`]: error taxonomy surfaced to callers

pub mod model;
