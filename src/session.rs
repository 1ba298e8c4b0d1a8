// src/session.rs

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, HeaderValue, Request, header},
    middleware::Next,
    response::Response,
};
use cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::Config, error::AppError};

/// Name of the HttpOnly cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

/// JWT Claims structure.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    /// Subject - Stores the User ID (as string).
    pub sub: String,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

/// The identity attached to the current request: the authenticated
/// user's id, or anonymous. Injected into request extensions by
/// `session_middleware` and threaded explicitly into the guard and the
/// handlers; there is no process-wide current user.
#[derive(Debug, Clone, Default)]
pub struct Session(Option<i64>);

impl Session {
    pub fn authenticated(user_id: i64) -> Self {
        Session(Some(user_id))
    }

    pub fn anonymous() -> Self {
        Session(None)
    }

    pub fn user_id(&self) -> Option<i64> {
        self.0
    }
}

/// Signs a session token for the user.
pub fn sign_session(
    user_id: i64,
    secret: &str,
    expiration_seconds: u64,
) -> Result<String, AppError> {
    // Calculate expiration: current time + expiration_seconds
    let expiration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .as_secs() as usize
        + expiration_seconds as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Verifies and decodes a session token, returning the user id.
/// Expired or tampered tokens simply yield no identity.
pub fn verify_session(token: &str, secret: &str) -> Option<i64> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;

    token_data.claims.sub.parse().ok()
}

/// Builds the Set-Cookie header establishing a session for `user_id`.
pub fn session_cookie_header(
    user_id: i64,
    config: &Config,
) -> Result<(HeaderName, HeaderValue), AppError> {
    let token = sign_session(user_id, &config.jwt_secret, config.jwt_expiration)?;
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    let value = HeaderValue::from_str(&cookie.to_string())
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    Ok((header::SET_COOKIE, value))
}

/// Set-Cookie header that discards the session (sign-out).
pub fn clear_session_header() -> Result<(HeaderName, HeaderValue), AppError> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();

    let value = HeaderValue::from_str(&cookie.to_string())
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    Ok((header::SET_COOKIE, value))
}

/// Finds a cookie by name in a raw Cookie header value.
pub(crate) fn find_cookie(raw: &str, name: &str) -> Option<String> {
    Cookie::split_parse(raw.to_owned())
        .flatten()
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
}

/// Axum Middleware: Session identity.
///
/// Reads the session cookie, validates the token, and injects a
/// `Session` into the request extensions. Never rejects: requests
/// without a valid token proceed as anonymous, and each handler
/// decides what anonymity means for it.
pub async fn session_middleware(
    State(config): State<Config>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let session = req
        .headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| find_cookie(raw, SESSION_COOKIE))
        .and_then(|token| verify_session(&token, &config.jwt_secret))
        .map(Session::authenticated)
        .unwrap_or_else(Session::anonymous);

    req.extensions_mut().insert(session);
    next.run(req).await
}
