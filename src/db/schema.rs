//! SQL DDL for initializing the application storage.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `users.email` UNIQUE (creates an index implicitly)
/// - `book.user_id` referencing the owning user, indexed for the per-user listing
/// - `sessions.user_id` nullable so an anonymous session can carry a flash message
/// - `sessions.created_at` stored as RFC 3339 text
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS book (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    status TEXT NOT NULL,
    rate INTEGER NULL,
    notes TEXT NULL,
    user_id INTEGER NOT NULL REFERENCES users(id)
);

CREATE INDEX IF NOT EXISTS idx_book_user_id ON book(user_id);

CREATE TABLE IF NOT EXISTS sessions (
    session_id TEXT PRIMARY KEY,
    user_id INTEGER NULL REFERENCES users(id),
    flash TEXT NULL,
    created_at TEXT NOT NULL
);
"#;
