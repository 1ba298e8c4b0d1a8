// src/handlers/auth.rs

use axum::{
    Extension, Form, Json,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde_json::json;
use sqlx::SqlitePool;

use crate::{
    config::Config,
    error::AppError,
    flash,
    models::user::{SignInForm, SignUpForm, User},
    session::{self, Session},
    utils::hash::{hash_password, verify_password},
    validation::{self, FieldError, messages},
};

pub const SIGN_IN_PATH: &str = "/users/sign_in";

/// GET /users/sign_up
pub async fn sign_up_form(Extension(session): Extension<Session>, headers: HeaderMap) -> Response {
    let (notice, clear) = flash::take(&headers);
    let body = json!({
        "flash": notice,
        "signed_in": session.user_id().is_some(),
    });
    (clear, Json(body)).into_response()
}

/// POST /users — registration.
///
/// Runs the full rule list plus the store-backed email uniqueness
/// check; every violation is reported together and nothing is written
/// unless all pass. On success the new user is signed in immediately
/// and sent to the feed.
pub async fn create_user(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Form(payload): Form<SignUpForm>,
) -> Result<Response, AppError> {
    let mut errors = validation::validate_sign_up(&payload);

    // Uniqueness needs the store, so it joins the pure rules here.
    // The UNIQUE constraint below settles concurrent registrations.
    if !payload.email.is_empty() {
        let taken = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(&payload.email)
            .fetch_one(&pool)
            .await?;
        if taken > 0 {
            errors.push(FieldError {
                field: "email",
                message: messages::EMAIL_TAKEN,
            });
        }
    }

    if !errors.is_empty() {
        return Err(AppError::Validation {
            errors,
            values: echo_values(&payload),
            flash: None,
        });
    }

    let hashed_password = hash_password(&payload.password)?;

    let result = sqlx::query(
        "INSERT INTO users (nickname, email, password, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(&payload.nickname)
    .bind(&payload.email)
    .bind(&hashed_password)
    .bind(chrono::Utc::now())
    .execute(&pool)
    .await
    .map_err(|e| {
        // SQLite reports a lost uniqueness race as error code 2067.
        if e.to_string().contains("UNIQUE constraint failed") {
            AppError::Validation {
                errors: vec![FieldError {
                    field: "email",
                    message: messages::EMAIL_TAKEN,
                }],
                values: echo_values(&payload),
                flash: None,
            }
        } else {
            tracing::error!("Failed to register user: {:?}", e);
            AppError::from(e)
        }
    })?;

    let user_id = result.last_insert_rowid();
    let session_cookie = session::session_cookie_header(user_id, &config)?;

    tracing::info!("user {} registered", user_id);
    Ok((AppendHeaders(vec![session_cookie]), Redirect::to("/")).into_response())
}

/// GET /users/sign_in
pub async fn sign_in_form(Extension(session): Extension<Session>, headers: HeaderMap) -> Response {
    let (notice, clear) = flash::take(&headers);
    let body = json!({
        "flash": notice,
        "signed_in": session.user_id().is_some(),
    });
    (clear, Json(body)).into_response()
}

/// POST /users/sign_in
///
/// Bad credentials return the caller to the sign-in page with one
/// generic notice; whether the email exists is never revealed.
pub async fn sign_in(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Form(payload): Form<SignInForm>,
) -> Result<Response, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, nickname, email, password, created_at FROM users WHERE email = ?",
    )
    .bind(&payload.email)
    .fetch_optional(&pool)
    .await?;

    let Some(user) = user else {
        return Ok(sign_in_rejected(&payload.email));
    };

    if !verify_password(&payload.password, &user.password)? {
        return Ok(sign_in_rejected(&payload.email));
    }

    let session_cookie = session::session_cookie_header(user.id, &config)?;
    let mut headers = vec![session_cookie];
    headers.extend(flash::set_header(flash::SIGNED_IN));

    tracing::info!("user {} signed in", user.id);
    Ok((AppendHeaders(headers), Redirect::to("/")).into_response())
}

fn sign_in_rejected(email: &str) -> Response {
    tracing::warn!("failed sign-in attempt for {}", email);
    flash::redirect_with_flash(SIGN_IN_PATH, flash::BAD_CREDENTIALS)
}

/// DELETE (or POST) /users/sign_out
pub async fn sign_out(Extension(session): Extension<Session>) -> Result<Response, AppError> {
    let Some(user_id) = session.user_id() else {
        return Ok(flash::redirect_with_flash(
            SIGN_IN_PATH,
            flash::SIGN_IN_REQUIRED,
        ));
    };

    let mut headers = vec![session::clear_session_header()?];
    headers.extend(flash::set_header(flash::SIGNED_OUT));

    tracing::info!("user {} signed out", user_id);
    Ok((AppendHeaders(headers), Redirect::to("/")).into_response())
}

/// Values echoed back so a re-rendered form can repopulate its inputs.
/// Passwords are never echoed.
fn echo_values(payload: &SignUpForm) -> serde_json::Value {
    json!({
        "nickname": payload.nickname,
        "email": payload.email,
    })
}
