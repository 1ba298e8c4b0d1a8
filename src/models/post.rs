use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'posts' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Form body for creating a post (POST /posts).
#[derive(Debug, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// A post joined with its author's current nickname. The nickname is
/// read from the users table on every listing, never stored on the
/// post row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostWithAuthor {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub author_nickname: String,
}

/// Body of the feed (GET /) and post list (GET /posts) pages.
#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub flash: Option<String>,
    pub signed_in: bool,
    pub posts: Vec<PostWithAuthor>,
}

/// Body of the post detail page (GET /posts/{id}).
///
/// `deletable` reports whether the current session may delete this
/// post; the view uses it for the delete control only. The delete
/// handler re-checks the same authorization on every request.
#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostWithAuthor,
    pub deletable: bool,
    pub signed_in: bool,
}
