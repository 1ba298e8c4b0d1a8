// src/handlers/posts.rs

use axum::{
    Extension, Form, Json,
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use serde_json::json;
use sqlx::SqlitePool;

use crate::{
    authz,
    error::AppError,
    flash,
    handlers::auth::SIGN_IN_PATH,
    models::post::{FeedResponse, PostDetailResponse, PostForm, PostWithAuthor},
    session::Session,
    validation,
};

/// Feed ordering: newest first, id as the tie-break so repeated reads
/// of same-instant posts never flip.
const FEED_QUERY: &str = "\
    SELECT p.id, p.user_id, p.title, p.content, p.created_at, u.nickname AS author_nickname \
    FROM posts p \
    JOIN users u ON p.user_id = u.id \
    ORDER BY p.created_at DESC, p.id DESC";

async fn load_feed(pool: &SqlitePool) -> Result<Vec<PostWithAuthor>, AppError> {
    let posts = sqlx::query_as::<_, PostWithAuthor>(FEED_QUERY)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list posts: {:?}", e);
            AppError::from(e)
        })?;
    Ok(posts)
}

/// GET / — the home feed. Anonymous-readable, always the live store.
pub async fn feed(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<Session>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let posts = load_feed(&pool).await?;
    let (notice, clear) = flash::take(&headers);

    let body = FeedResponse {
        flash: notice,
        signed_in: session.user_id().is_some(),
        posts,
    };
    Ok((clear, Json(body)).into_response())
}

/// GET /posts — same listing as the feed, at the posts path.
pub async fn list_posts(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<Session>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    feed(State(pool), Extension(session), headers).await
}

/// GET /posts/new — the creation form. Anonymous sessions are sent to
/// sign-in instead.
pub async fn new_post_form(Extension(session): Extension<Session>, headers: HeaderMap) -> Response {
    if !authz::can_create_post(&session) {
        return flash::redirect_with_flash(SIGN_IN_PATH, flash::SIGN_IN_REQUIRED);
    }

    let (notice, clear) = flash::take(&headers);
    let body = json!({
        "flash": notice,
        "signed_in": true,
        "values": { "title": "", "content": "" },
    });
    (clear, Json(body)).into_response()
}

/// POST /posts — create a post owned by the current session.
///
/// The author is always the session identity; a user_id in the request
/// body would be ignored because the form carries none. Anonymous
/// requests are refused here too, not only at the form: the redirect
/// is the same but nothing is ever written.
pub async fn create_post(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<Session>,
    Form(payload): Form<PostForm>,
) -> Result<Response, AppError> {
    if !authz::can_create_post(&session) {
        tracing::warn!("anonymous post creation refused");
        return Ok(flash::redirect_with_flash(
            SIGN_IN_PATH,
            flash::SIGN_IN_REQUIRED,
        ));
    }
    let user_id = session.user_id().unwrap_or(0);

    let errors = validation::validate_post(&payload);
    if !errors.is_empty() {
        return Err(AppError::Validation {
            errors,
            values: json!({ "title": payload.title, "content": payload.content }),
            flash: Some(flash::POST_CREATE_FAILED),
        });
    }

    sqlx::query("INSERT INTO posts (user_id, title, content, created_at) VALUES (?, ?, ?, ?)")
        .bind(user_id)
        .bind(&payload.title)
        .bind(&payload.content)
        .bind(chrono::Utc::now())
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create post: {:?}", e);
            AppError::from(e)
        })?;

    tracing::info!("user {} created a post", user_id);
    Ok(flash::redirect_with_flash("/posts", flash::POST_CREATED))
}

/// GET /posts/{id} — post detail with the author's current nickname.
pub async fn show_post(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let post = sqlx::query_as::<_, PostWithAuthor>(
        "SELECT p.id, p.user_id, p.title, p.content, p.created_at, u.nickname AS author_nickname \
         FROM posts p \
         JOIN users u ON p.user_id = u.id \
         WHERE p.id = ?",
    )
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Post not found".to_string()))?;

    let deletable = authz::can_delete_post(&session, post.user_id);
    let body = PostDetailResponse {
        post,
        deletable,
        signed_in: session.user_id().is_some(),
    };
    Ok(Json(body).into_response())
}

/// DELETE /posts/{id}
///
/// Owner-only, checked here regardless of what any view rendered. The
/// DELETE itself is scoped to the owner as well, so the check and the
/// removal are one store operation; losing a race with another delete
/// degrades to 404 and never touches the count.
pub async fn delete_post(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let Some(user_id) = session.user_id() else {
        tracing::warn!("anonymous delete refused for post {}", id);
        return Ok(flash::redirect_with_flash(
            SIGN_IN_PATH,
            flash::SIGN_IN_REQUIRED,
        ));
    };

    let owner_id = sqlx::query_scalar::<_, i64>("SELECT user_id FROM posts WHERE id = ?")
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Post not found".to_string()))?;

    if !authz::can_delete_post(&session, owner_id) {
        tracing::warn!("user {} refused deleting post {} of user {}", user_id, id, owner_id);
        return Err(AppError::Forbidden(
            "You are not authorized to delete this post".to_string(),
        ));
    }

    let result = sqlx::query("DELETE FROM posts WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete post: {:?}", e);
            AppError::from(e)
        })?;

    if result.rows_affected() == 0 {
        // Deleted concurrently between the ownership read and here.
        return Err(AppError::NotFound("Post not found".to_string()));
    }

    tracing::info!("user {} deleted post {}", user_id, id);
    Ok(flash::redirect_with_flash("/posts", flash::POST_DELETED))
}
