use crate::auth::credentials::verify_password;
use crate::db::models::User;
use crate::db::sqlite::LibraryStorage;
use crate::error::ShelfError;

/// Why a login attempt was rejected. These are surfaced to the user verbatim,
/// not treated as request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFailure {
    UserNotFound,
    IncorrectPassword,
}

impl LoginFailure {
    pub fn message(self) -> &'static str {
        match self {
            LoginFailure::UserNotFound => "User not found.",
            LoginFailure::IncorrectPassword => "Incorrect password.",
        }
    }
}

#[derive(Debug)]
pub enum LoginOutcome {
    Granted(User),
    Denied(LoginFailure),
}

/// Validates an email/password pair against the user table. Storage or bcrypt
/// faults propagate as `ShelfError` and are fatal to the request.
pub async fn authenticate(
    storage: &LibraryStorage,
    email: &str,
    password: &str,
) -> Result<LoginOutcome, ShelfError> {
    let Some(user) = storage.find_user_by_email(email).await? else {
        return Ok(LoginOutcome::Denied(LoginFailure::UserNotFound));
    };
    if verify_password(password, &user.password)? {
        Ok(LoginOutcome::Granted(user))
    } else {
        Ok(LoginOutcome::Denied(LoginFailure::IncorrectPassword))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::credentials::hash_password;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;

    // A pooled in-memory SQLite gives every connection its own database, so
    // the pool is pinned to a single long-lived connection.
    async fn storage_with_user(email: &str, password: &str) -> LibraryStorage {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:").expect("bad url");
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await
            .expect("failed to open in-memory database");
        let storage = LibraryStorage::new(pool);
        storage.init_schema().await.expect("failed to init schema");
        let hashed = hash_password(password).expect("hashing failed");
        storage
            .create_user("ana", email, &hashed)
            .await
            .expect("failed to create user");
        storage
    }

    #[tokio::test]
    async fn grants_matching_credentials() {
        let storage = storage_with_user("a@x.com", "pw1").await;
        let outcome = authenticate(&storage, "a@x.com", "pw1")
            .await
            .expect("authenticate failed");
        match outcome {
            LoginOutcome::Granted(user) => assert_eq!(user.email, "a@x.com"),
            LoginOutcome::Denied(f) => panic!("unexpected denial: {f:?}"),
        }
    }

    #[tokio::test]
    async fn denies_wrong_password() {
        let storage = storage_with_user("a@x.com", "pw1").await;
        let outcome = authenticate(&storage, "a@x.com", "pw2")
            .await
            .expect("authenticate failed");
        assert!(matches!(
            outcome,
            LoginOutcome::Denied(LoginFailure::IncorrectPassword)
        ));
    }

    #[tokio::test]
    async fn denies_unknown_email() {
        let storage = storage_with_user("a@x.com", "pw1").await;
        let outcome = authenticate(&storage, "b@x.com", "pw1")
            .await
            .expect("authenticate failed");
        assert!(matches!(
            outcome,
            LoginOutcome::Denied(LoginFailure::UserNotFound)
        ));
    }
}
