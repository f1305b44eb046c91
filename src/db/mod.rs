//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: the data access layer, one parameterized statement per operation

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Book, BookDraft, User};
pub use schema::SQLITE_INIT;
pub use sqlite::{LibraryStorage, SqlitePool};
