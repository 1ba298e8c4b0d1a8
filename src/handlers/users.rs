// src/handlers/users.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::{post::Post, user::{ProfileResponse, User}},
    session::Session,
};

/// GET /users/{id} — public profile: nickname, the user's posts and
/// their count. The count comes from the fetched list itself, so list
/// and count cannot disagree within one response. The nickname is read
/// fresh from the users table on every call.
pub async fn show_user(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, nickname, email, password, created_at FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("User not found".to_string()))?;

    let posts = sqlx::query_as::<_, Post>(
        "SELECT id, user_id, title, content, created_at FROM posts \
         WHERE user_id = ? \
         ORDER BY created_at DESC, id DESC",
    )
    .bind(id)
    .fetch_all(&pool)
    .await?;

    let posts_count = posts.len() as i64;
    Ok(Json(ProfileResponse {
        id: user.id,
        nickname: user.nickname,
        posts_count,
        posts,
        signed_in: session.user_id().is_some(),
    }))
}
