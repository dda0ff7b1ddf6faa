//! Shared setup for router-level tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        Method, Request, Response, StatusCode,
    },
    Router,
};
use tower::ServiceExt;

use vote_api::{build_router, AppState};
use vote_infrastructure::{InMemoryAccountRepository, InMemoryTrackRepository};
use vote_security::MemorySessionStore;
use vote_shared::config::{AppConfig, SessionStrategy};

pub const FORM: &str = "application/x-www-form-urlencoded";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemorySessionStore>,
}

impl TestApp {
    pub fn new(strategy: SessionStrategy) -> Self {
        let mut config = AppConfig::defaults().expect("default config");
        config.session.strategy = strategy;

        let store = Arc::new(MemorySessionStore::new());
        let state = AppState::new(
            &config,
            Arc::new(InMemoryAccountRepository::seeded()),
            Arc::new(InMemoryTrackRepository::seeded()),
            store.clone(),
        )
        .expect("app state");

        Self {
            router: build_router(state.clone()),
            state,
            store,
        }
    }

    pub fn cookie() -> Self {
        Self::new(SessionStrategy::Cookie)
    }

    pub fn token() -> Self {
        Self::new(SessionStrategy::Token)
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn login(&self, username: &str, password: &str) -> Response<Body> {
        let body = format!("username={}&password={}", username, password);
        self.send(post_form("/login", &body, None)).await
    }
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request")
}

pub fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, FORM);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::from(body.to_owned())).expect("request")
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .expect("request")
}

/// POST without any `Content-Type`.
pub fn post_raw(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::from(body.to_owned())).expect("request")
}

pub fn location(response: &Response<Body>) -> String {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("location header")
        .to_string()
}

pub fn set_cookie_header(response: &Response<Body>) -> String {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("set-cookie header")
        .to_string()
}

/// `name=value` pair from the first `Set-Cookie` header.
pub fn session_cookie(response: &Response<Body>) -> String {
    let raw = set_cookie_header(response);
    raw.split(';').next().unwrap_or_default().trim().to_string()
}

/// Handle carried in a token-mode redirect.
pub fn token_from_location(location: &str) -> String {
    location
        .split_once("token=")
        .map(|(_, rest)| rest.split('&').next().unwrap_or_default().to_string())
        .expect("token in location")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
