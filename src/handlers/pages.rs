use axum::extract::State;
use axum::response::{IntoResponse, Redirect};

use crate::error::ShelfError;
use crate::handlers::views;
use crate::middleware::session::{CurrentUser, SessionIdentity};
use crate::router::ShelfState;

/// GET / -> listing for a logged-in user, landing page otherwise.
pub async fn index(identity: SessionIdentity) -> impl IntoResponse {
    if identity.user.is_some() {
        Redirect::to("/home").into_response()
    } else {
        views::landing_page().into_response()
    }
}

/// GET /login -> login form, consuming any pending flash message.
pub async fn login_form(
    State(state): State<ShelfState>,
    identity: SessionIdentity,
) -> Result<impl IntoResponse, ShelfError> {
    let flash = match identity.session_id.as_deref() {
        Some(sid) => state.storage.take_flash(sid).await?,
        None => None,
    };
    Ok(views::login_page(flash.as_deref()))
}

pub async fn register_form() -> impl IntoResponse {
    views::register_page()
}

/// GET /home -> the current user's books.
pub async fn home(
    State(state): State<ShelfState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, ShelfError> {
    let books = state.storage.list_books(user.id).await?;
    Ok(views::home_page(&user.username, &books))
}

pub async fn add_form(CurrentUser(_user): CurrentUser) -> impl IntoResponse {
    views::add_page()
}
