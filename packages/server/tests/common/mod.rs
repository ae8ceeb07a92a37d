// Common test utilities

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use blogcast::kernel::TestDependencies;
use blogcast::server::{build_app, SessionOptions};

/// Router wired to the given mocks, with the production middleware stack.
pub fn build_test_app(test: &TestDependencies) -> Router {
    build_app(test.server_deps(), SessionOptions::default())
}

/// Send a request with an optional session cookie.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, cookie).await
}

pub async fn post(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    send(app, Method::POST, uri, cookie).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// `name=value` of the session cookie set by a response, if any.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with("id="))
        .map(String::from)
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// Walk through `/login` and `/callback` and return the signed-in cookie.
pub async fn sign_in(app: &Router) -> String {
    let login = get(app, "/login", None).await;
    let cookie = session_cookie(&login).expect("login sets a session cookie");

    let callback = get(
        app,
        "/callback?code=good-code&state=mock-state",
        Some(&cookie),
    )
    .await;
    assert_eq!(location(&callback), "/blogs");
    session_cookie(&callback).expect("callback issues a fresh session id")
}
