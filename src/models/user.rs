// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::post::Post;

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    /// Display name, 1-20 characters.
    pub nickname: String,

    /// Login identifier. Unique.
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Form body for user registration (POST /users).
///
/// Fields default to empty strings so a missing input reports the same
/// way as a blank one.
#[derive(Debug, Deserialize)]
pub struct SignUpForm {
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirmation: String,
}

/// Form body for sign-in (POST /users/sign_in).
#[derive(Debug, Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// User page data: the user's nickname, their posts and the exact
/// count of those posts. The count is taken from the returned list
/// itself, so the two can never disagree within one response.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub nickname: String,
    pub posts_count: i64,
    pub posts: Vec<Post>,
    pub signed_in: bool,
}
