#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, header};
use shelfmark::db::LibraryStorage;
use shelfmark::{ShelfState, shelf_router};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

const TEST_SECRET: &str = "shelfmark-test-secret-0123456789-0123456789";

pub struct TestApp {
    pub app: Router,
    pub storage: LibraryStorage,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_path);
    }
}

pub async fn spawn_app(tag: &str) -> TestApp {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut db_path = std::env::temp_dir();
    db_path.push(format!(
        "shelfmark-{}-{}-{}.sqlite",
        tag,
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", db_path.display());
    let storage = LibraryStorage::connect(&database_url)
        .await
        .expect("failed to open test database");
    storage.init_schema().await.expect("failed to init schema");

    let state = ShelfState::new(storage.clone(), TEST_SECRET);
    TestApp {
        app: shelf_router(state),
        storage,
        db_path,
    }
}

pub async fn get(app: &Router, path: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, c);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).expect("failed to build request"))
        .await
        .expect("request failed")
}

pub async fn post_form(
    app: &Router,
    path: &str,
    body: &str,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, c);
    }
    app.clone()
        .oneshot(
            builder
                .body(Body::from(body.to_string()))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed")
}

/// The `shelf_session` cookie pair from a response, ready for a Cookie header.
pub fn session_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("shelf_session="))
        .map(|v| v.split(';').next().unwrap_or(v).to_string())
}

pub fn location(resp: &Response<Body>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("response carried no Location header")
        .to_string()
}

pub async fn body_text(resp: Response<Body>) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("response body was not utf-8")
}

/// Registers a user and returns the session cookie the server issued.
pub async fn register(app: &Router, name: &str, email: &str, password: &str) -> String {
    let body = format!("userName={name}&userEmail={email}&userPassword={password}");
    let resp = post_form(app, "/register", &body, None).await;
    assert!(
        resp.status().is_redirection(),
        "register did not redirect: {}",
        resp.status()
    );
    assert_eq!(location(&resp), "/home");
    session_cookie(&resp).expect("register set no session cookie")
}
