use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};

use crate::db::models::User;
use crate::db::sqlite::LibraryStorage;
use crate::error::ShelfError;
use crate::router::ShelfState;

pub const SESSION_COOKIE: &str = "shelf_session";

/// Resolves the session cookie to a user without gating the request.
/// A missing cookie, stale session id, or vanished user row all resolve to
/// `user: None`.
#[derive(Debug)]
pub struct SessionIdentity {
    pub session_id: Option<String>,
    pub user: Option<User>,
}

impl FromRequestParts<ShelfState> for SessionIdentity {
    type Rejection = ShelfError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ShelfState,
    ) -> Result<Self, Self::Rejection> {
        let jar = extract_jar(parts, state).await;
        let session_id = jar.get(SESSION_COOKIE).map(|c| c.value().to_owned());
        let user = match session_id.as_deref() {
            Some(sid) => state.storage.session_user(sid).await?,
            None => None,
        };
        Ok(Self { session_id, user })
    }
}

/// The authentication gate: routes reading per-user state extract this, and an
/// unauthenticated request is redirected to the landing page instead of erroring.
#[derive(Debug)]
pub struct CurrentUser(pub User);

impl FromRequestParts<ShelfState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ShelfState,
    ) -> Result<Self, Self::Rejection> {
        let identity = SessionIdentity::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        match identity.user {
            Some(user) => Ok(Self(user)),
            None => Err(Redirect::to("/").into_response()),
        }
    }
}

async fn extract_jar(parts: &mut Parts, state: &ShelfState) -> PrivateCookieJar {
    match PrivateCookieJar::from_request_parts(parts, state).await {
        Ok(jar) => jar,
        Err(err) => match err {},
    }
}

/// Destroys any previous session row and issues a fresh logged-in session,
/// so a login never reuses a session id observed before authentication.
pub async fn establish_session(
    storage: &LibraryStorage,
    jar: PrivateCookieJar,
    previous: Option<String>,
    user_id: i64,
) -> Result<PrivateCookieJar, ShelfError> {
    if let Some(old) = previous {
        storage.destroy_session(&old).await?;
    }
    let session_id = storage.create_session(Some(user_id)).await?;
    Ok(jar.add(session_cookie(session_id)))
}

pub async fn clear_session(
    storage: &LibraryStorage,
    jar: PrivateCookieJar,
    session_id: Option<String>,
) -> Result<PrivateCookieJar, ShelfError> {
    if let Some(sid) = session_id {
        storage.destroy_session(&sid).await?;
    }
    Ok(jar.remove(expired_cookie()))
}

/// Stores a single-use message on the session and bounces to the login form.
/// When the request carried no session (or a stale id), an anonymous session is
/// created so the message survives the redirect.
pub async fn flash_to_login(
    storage: &LibraryStorage,
    mut jar: PrivateCookieJar,
    session_id: Option<String>,
    message: &str,
) -> Result<(PrivateCookieJar, Redirect), ShelfError> {
    let updated = match session_id.as_deref() {
        Some(sid) => storage.set_flash(sid, message).await?,
        None => 0,
    };
    if updated == 0 {
        let fresh = storage.create_session(None).await?;
        storage.set_flash(&fresh, message).await?;
        jar = jar.add(session_cookie(fresh));
    }
    Ok((jar, Redirect::to("/login")))
}

fn session_cookie(session_id: String) -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE.to_string(), session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

fn expired_cookie() -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE.to_string(), ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
