use axum::Form;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::db::models::BookDraft;
use crate::error::ShelfError;
use crate::handlers::views;
use crate::middleware::session::CurrentUser;
use crate::router::ShelfState;

#[derive(Debug, Deserialize)]
pub struct AddForm {
    pub title: String,
    pub author: String,
    pub status: String,
    #[serde(default)]
    pub rate: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EditForm {
    #[serde(rename = "updatedBookId")]
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub status: String,
    #[serde(default)]
    pub rate: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    #[serde(rename = "deletedBookId")]
    pub book_id: i64,
}

/// GET /detail/{id} -> the book page, owner-scoped; 404 when the id does not
/// resolve to a book of the current user.
pub async fn detail(
    State(state): State<ShelfState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Response, ShelfError> {
    match state.storage.find_book(user.id, id).await? {
        Some(book) => Ok(views::detail_page(&book).into_response()),
        None => Err(ShelfError::BookNotFound),
    }
}

/// POST /add -> insert and return to the add form; empty required fields are
/// rejected without persisting.
pub async fn add(
    State(state): State<ShelfState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<AddForm>,
) -> Result<Response, ShelfError> {
    if form.title.is_empty() || form.author.is_empty() || form.status.is_empty() {
        warn!(user_id = user.id, "rejected book with empty required fields");
        return Ok(Redirect::to("/addNew").into_response());
    }
    let draft = BookDraft {
        title: form.title,
        author: form.author,
        status: form.status,
        rate: form.rate,
        notes: form.notes,
    };
    state.storage.insert_book(user.id, &draft).await?;
    Ok(Redirect::to("/addNew").into_response())
}

/// POST /edit -> owner-scoped update; an id that is not the current user's
/// reads as not found.
pub async fn edit(
    State(state): State<ShelfState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<EditForm>,
) -> Result<Response, ShelfError> {
    let draft = BookDraft {
        title: form.title,
        author: form.author,
        status: form.status,
        rate: form.rate,
        notes: form.notes,
    };
    if !state.storage.update_book(user.id, form.book_id, &draft).await? {
        return Err(ShelfError::BookNotFound);
    }
    Ok(Redirect::to("/home").into_response())
}

/// POST /delete -> owner-scoped delete. Deleting an id that does not resolve
/// to an owned book is a no-op, not an error.
pub async fn delete(
    State(state): State<ShelfState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<DeleteForm>,
) -> Result<Response, ShelfError> {
    let removed = state.storage.delete_book(user.id, form.book_id).await?;
    if removed == 0 {
        debug!(user_id = user.id, book_id = form.book_id, "delete matched no rows");
    }
    Ok(Redirect::to("/home").into_response())
}
