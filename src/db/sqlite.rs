use crate::db::models::{Book, BookDraft, User};
use crate::db::schema::SQLITE_INIT;
use crate::error::ShelfError;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use uuid::Uuid;

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct LibraryStorage {
    pool: SqlitePool,
}

impl LibraryStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, ShelfError> {
        let opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(opts).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), ShelfError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, ShelfError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, ShelfError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Inserts a user and returns the created row.
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, ShelfError> {
        let result = sqlx::query("INSERT INTO users (username, email, password) VALUES (?, ?, ?)")
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password FROM users WHERE id = ?",
        )
        .bind(result.last_insert_rowid())
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn list_books(&self, user_id: i64) -> Result<Vec<Book>, ShelfError> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, status, rate, notes, user_id
             FROM book WHERE user_id = ? ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Owner-scoped lookup: a book id belonging to another user resolves to `None`.
    pub async fn find_book(&self, user_id: i64, book_id: i64) -> Result<Option<Book>, ShelfError> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, status, rate, notes, user_id
             FROM book WHERE id = ? AND user_id = ?",
        )
        .bind(book_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    pub async fn insert_book(&self, user_id: i64, draft: &BookDraft) -> Result<(), ShelfError> {
        sqlx::query(
            "INSERT INTO book (title, author, status, rate, notes, user_id)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.status)
        .bind(draft.rate)
        .bind(&draft.notes)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Owner-scoped update. Returns `false` when no owned row matched the id.
    pub async fn update_book(
        &self,
        user_id: i64,
        book_id: i64,
        draft: &BookDraft,
    ) -> Result<bool, ShelfError> {
        let result = sqlx::query(
            "UPDATE book SET title = ?, author = ?, status = ?, rate = ?, notes = ?
             WHERE id = ? AND user_id = ?",
        )
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.status)
        .bind(draft.rate)
        .bind(&draft.notes)
        .bind(book_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Owner-scoped delete. Returns the number of rows removed (0 or 1).
    pub async fn delete_book(&self, user_id: i64, book_id: i64) -> Result<u64, ShelfError> {
        let result = sqlx::query("DELETE FROM book WHERE id = ? AND user_id = ?")
            .bind(book_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Creates a session row and returns its opaque id. `user_id` is `None` for
    /// an anonymous session that only carries a flash message.
    pub async fn create_session(&self, user_id: Option<i64>) -> Result<String, ShelfError> {
        let session_id = Uuid::new_v4().to_string();
        let created_at = Utc::now().to_rfc3339();
        sqlx::query("INSERT INTO sessions (session_id, user_id, created_at) VALUES (?, ?, ?)")
            .bind(&session_id)
            .bind(user_id)
            .bind(created_at)
            .execute(&self.pool)
            .await?;
        Ok(session_id)
    }

    /// Resolves a session id to its user row. A stale id, an anonymous session,
    /// or a missing user all resolve to `None` (the request proceeds unauthenticated).
    pub async fn session_user(&self, session_id: &str) -> Result<Option<User>, ShelfError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT u.id, u.username, u.email, u.password
             FROM sessions s JOIN users u ON u.id = s.user_id
             WHERE s.session_id = ?",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn destroy_session(&self, session_id: &str) -> Result<(), ShelfError> {
        sqlx::query("DELETE FROM sessions WHERE session_id = ?")
            .bind(session_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Returns the number of rows updated; 0 means the session id is stale.
    pub async fn set_flash(&self, session_id: &str, message: &str) -> Result<u64, ShelfError> {
        let result = sqlx::query("UPDATE sessions SET flash = ? WHERE session_id = ?")
            .bind(message)
            .bind(session_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Reads and clears the flash message in one pass; it is shown at most once.
    pub async fn take_flash(&self, session_id: &str) -> Result<Option<String>, ShelfError> {
        let row = sqlx::query_as::<_, (Option<String>,)>(
            "SELECT flash FROM sessions WHERE session_id = ?",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;
        let Some((Some(message),)) = row else {
            return Ok(None);
        };
        sqlx::query("UPDATE sessions SET flash = NULL WHERE session_id = ?")
            .bind(session_id)
            .execute(&self.pool)
            .await?;
        Ok(Some(message))
    }
}
