use axum::Router;
use axum::extract::FromRef;
use axum::routing::{get, post};
use axum_extra::extract::cookie::Key;

use crate::db::sqlite::LibraryStorage;
use crate::handlers::{auth, books, pages};

#[derive(Clone)]
pub struct ShelfState {
    pub storage: LibraryStorage,
    key: Key,
}

impl ShelfState {
    /// `secret` keys the private cookie jar and must supply at least 32 bytes.
    pub fn new(storage: LibraryStorage, secret: &str) -> Self {
        Self {
            storage,
            key: Key::derive_from(secret.as_bytes()),
        }
    }
}

impl FromRef<ShelfState> for Key {
    fn from_ref(state: &ShelfState) -> Key {
        state.key.clone()
    }
}

pub fn shelf_router(state: ShelfState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/login", get(pages::login_form).post(auth::login))
        .route("/register", get(pages::register_form).post(auth::register))
        .route("/home", get(pages::home))
        .route("/addNew", get(pages::add_form))
        .route("/detail/{id}", get(books::detail))
        .route("/logout", get(auth::logout))
        .route("/add", post(books::add))
        .route("/edit", post(books::edit))
        .route("/delete", post(books::delete))
        .with_state(state)
}
