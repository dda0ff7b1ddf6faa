// ============================================================================
// Vote API - Session Transport
// File: crates/vote-api/src/transport.rs
// ============================================================================
//! How the session handle travels between client and server.
//!
//! `cookie`: a signed cookie holds the handle and the browser echoes it.
//! `token`: the handle is carried explicitly on every request, as an
//! `Authorization: Bearer` header, a `token` query parameter, or a `token`
//! field in a urlencoded form body (checked in that order). The two are
//! never mixed within one deployment.

use axum::{
    body::{to_bytes, Body},
    extract::{FromRequest, Query, Request},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderMap, Method, Uri,
    },
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use vote_security::SessionHandle;
use vote_shared::config::{SessionSettings, SessionStrategy};
use vote_shared::constants::{ERROR_PARAM, TOKEN_PARAM};

use crate::error::ApiError;

const FORM_BODY_LIMIT: usize = 64 * 1024;
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Default, Deserialize)]
struct TokenParam {
    #[serde(default)]
    token: Option<String>,
}

#[derive(Clone)]
pub struct SessionTransport {
    strategy: SessionStrategy,
    cookie_name: String,
    cookie_secure: bool,
    cookie_max_age: time::Duration,
    key: Key,
}

impl SessionTransport {
    pub fn from_settings(settings: &SessionSettings) -> Self {
        // Key::derive_from wants at least 32 bytes of master key material.
        let master = Sha256::digest(settings.secret.as_bytes());
        Self {
            strategy: settings.strategy,
            cookie_name: settings.cookie_name.clone(),
            cookie_secure: settings.cookie_secure,
            cookie_max_age: time::Duration::hours(settings.ttl_hours),
            key: Key::derive_from(&master),
        }
    }

    pub fn strategy(&self) -> SessionStrategy {
        self.strategy
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Pull the handle out of `request`. A urlencoded body is buffered to
    /// look for a `token` field and then put back, so downstream handlers
    /// still see the full form.
    pub async fn extract(
        &self,
        request: Request,
    ) -> Result<(Request, Option<SessionHandle>), ApiError> {
        match self.strategy {
            SessionStrategy::Cookie => {
                let handle = self.from_cookie(request.headers());
                Ok((request, handle))
            }
            SessionStrategy::Token => {
                if let Some(handle) = Self::from_headers_or_query(&request) {
                    return Ok((request, Some(handle)));
                }
                Self::from_form_body(request).await
            }
        }
    }

    /// Header and query only. Used where the body must not be consumed.
    pub fn extract_without_body(
        &self,
        headers: &HeaderMap,
        query: Option<&str>,
    ) -> Option<SessionHandle> {
        match self.strategy {
            SessionStrategy::Cookie => self.from_cookie(headers),
            SessionStrategy::Token => bearer(headers).or_else(|| token_from_query(query)),
        }
    }

    fn from_cookie(&self, headers: &HeaderMap) -> Option<SessionHandle> {
        let jar = SignedCookieJar::from_headers(headers, self.key.clone());
        jar.get(&self.cookie_name)
            .map(|cookie| SessionHandle::from(cookie.value()))
    }

    fn from_headers_or_query(request: &Request) -> Option<SessionHandle> {
        bearer(request.headers()).or_else(|| token_from_query(request.uri().query()))
    }

    async fn from_form_body(request: Request) -> Result<(Request, Option<SessionHandle>), ApiError> {
        let is_form = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with(FORM_CONTENT_TYPE));
        if !is_form {
            return Ok((request, None));
        }

        let (parts, body) = request.into_parts();
        let bytes = to_bytes(body, FORM_BODY_LIMIT)
            .await
            .map_err(|e| ApiError::BadRequest(format!("Unreadable form body: {}", e)))?;

        let probe = axum::http::Request::builder()
            .method(Method::POST)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(Body::from(bytes.clone()))
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        let handle = Form::<TokenParam>::from_request(probe, &())
            .await
            .ok()
            .and_then(|Form(param)| param.token)
            .filter(|token| !token.is_empty())
            .map(SessionHandle::from);

        debug!("Token found in form body: {}", handle.is_some());
        Ok((Request::from_parts(parts, Body::from(bytes)), handle))
    }

    /// Build a same-site URL for `path`, carrying the handle in token mode
    /// and an optional `error` message.
    pub fn url(&self, path: &str, handle: Option<&SessionHandle>, error: Option<&str>) -> String {
        let mut query = Vec::new();
        if let (SessionStrategy::Token, Some(handle)) = (self.strategy, handle) {
            query.push(format!("{}={}", TOKEN_PARAM, urlencoding::encode(handle.as_str())));
        }
        if let Some(error) = error {
            query.push(format!("{}={}", ERROR_PARAM, urlencoding::encode(error)));
        }
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, query.join("&"))
        }
    }

    pub fn redirect(&self, path: &str, handle: &SessionHandle) -> Redirect {
        Redirect::to(&self.url(path, Some(handle), None))
    }

    pub fn redirect_with_error(&self, path: &str, handle: &SessionHandle, error: &str) -> Redirect {
        Redirect::to(&self.url(path, Some(handle), Some(error)))
    }

    /// Hand a freshly minted handle to the client and send it to `path`.
    pub fn issue(&self, jar: SignedCookieJar, handle: &SessionHandle, path: &str) -> Response {
        match self.strategy {
            SessionStrategy::Cookie => {
                let cookie = Cookie::build((self.cookie_name.clone(), handle.as_str().to_owned()))
                    .path("/")
                    .http_only(true)
                    .secure(self.cookie_secure)
                    .same_site(SameSite::Lax)
                    .max_age(self.cookie_max_age);
                (jar.add(cookie), Redirect::to(path)).into_response()
            }
            SessionStrategy::Token => self.redirect(path, handle).into_response(),
        }
    }

    /// Cookie removal for logout. A no-op jar in token mode.
    pub fn revoke(&self, jar: SignedCookieJar) -> SignedCookieJar {
        match self.strategy {
            SessionStrategy::Cookie => {
                jar.remove(Cookie::build((self.cookie_name.clone(), "")).path("/"))
            }
            SessionStrategy::Token => jar,
        }
    }
}

fn bearer(headers: &HeaderMap) -> Option<SessionHandle> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(SessionHandle::from)
}

fn token_from_query(query: Option<&str>) -> Option<SessionHandle> {
    let query = query?;
    let uri: Uri = format!("/?{}", query).parse().ok()?;
    Query::<TokenParam>::try_from_uri(&uri)
        .ok()
        .and_then(|Query(param)| param.token)
        .filter(|token| !token.is_empty())
        .map(SessionHandle::from)
}
