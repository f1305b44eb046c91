use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

const INTERNAL_ERROR_BODY: &str = "An internal server error occurred.";

#[derive(Debug, ThisError)]
pub enum ShelfError {
    #[error("database error: {0}")]
    Database(#[from] SqlxError),

    #[error("password hashing error: {0}")]
    Hashing(bcrypt::BcryptError),

    #[error("password comparison error: {0}")]
    Comparison(bcrypt::BcryptError),

    #[error("book not found")]
    BookNotFound,
}

impl IntoResponse for ShelfError {
    fn into_response(self) -> Response {
        match self {
            ShelfError::BookNotFound => (StatusCode::NOT_FOUND, "Book not found").into_response(),
            ShelfError::Database(e) => {
                error!(error = %e, "storage query failed");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
            }
            ShelfError::Hashing(e) => {
                error!(error = %e, "password hashing failed");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
            }
            ShelfError::Comparison(e) => {
                error!(error = %e, "password comparison failed");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
            }
        }
    }
}
