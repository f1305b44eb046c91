use axum::Form;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Deserialize;
use tracing::info;

use crate::auth::credentials::hash_password;
use crate::auth::{LoginOutcome, authenticate};
use crate::error::ShelfError;
use crate::middleware::session::{
    SessionIdentity, clear_session, establish_session, flash_to_login,
};
use crate::router::ShelfState;

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(rename = "userName")]
    pub username: String,
    #[serde(rename = "userEmail")]
    pub email: String,
    #[serde(rename = "userPassword")]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(rename = "userEmail")]
    pub email: String,
    #[serde(rename = "userPassword")]
    pub password: String,
}

/// POST /register -> create the account and log it in, or bounce an already
/// registered email to the login form.
pub async fn register(
    State(state): State<ShelfState>,
    identity: SessionIdentity,
    jar: PrivateCookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response, ShelfError> {
    if state.storage.find_user_by_email(&form.email).await?.is_some() {
        info!(email = %form.email, "registration with existing email");
        return Ok(Redirect::to("/login").into_response());
    }
    let hashed = hash_password(&form.password)?;
    let user = state
        .storage
        .create_user(&form.username, &form.email, &hashed)
        .await?;
    info!(user_id = user.id, "registered new user");
    let jar = establish_session(&state.storage, jar, identity.session_id, user.id).await?;
    Ok((jar, Redirect::to("/home")).into_response())
}

/// POST /login -> establish a session on success, flash the failure reason on
/// rejection.
pub async fn login(
    State(state): State<ShelfState>,
    identity: SessionIdentity,
    jar: PrivateCookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, ShelfError> {
    match authenticate(&state.storage, &form.email, &form.password).await? {
        LoginOutcome::Granted(user) => {
            info!(user_id = user.id, "login succeeded");
            let jar = establish_session(&state.storage, jar, identity.session_id, user.id).await?;
            Ok((jar, Redirect::to("/home")).into_response())
        }
        LoginOutcome::Denied(failure) => {
            info!(email = %form.email, reason = failure.message(), "login rejected");
            let (jar, redirect) =
                flash_to_login(&state.storage, jar, identity.session_id, failure.message())
                    .await?;
            Ok((jar, redirect).into_response())
        }
    }
}

/// GET /logout -> destroy the session and return to the landing page.
pub async fn logout(
    State(state): State<ShelfState>,
    identity: SessionIdentity,
    jar: PrivateCookieJar,
) -> Result<Response, ShelfError> {
    let jar = clear_session(&state.storage, jar, identity.session_id).await?;
    Ok((jar, Redirect::to("/")).into_response())
}
