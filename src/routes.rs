// src/routes.rs

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{auth, posts, users},
    session::session_middleware,
    state::AppState,
};

/// Assembles the main application router.
///
/// The route table mirrors the app's URL contract one to one. Every
/// request passes the session middleware first, so handlers always see
/// a `Session` (possibly anonymous) in their extensions.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(posts::feed))
        .route("/users", post(auth::create_user))
        .route("/users/sign_up", get(auth::sign_up_form))
        .route("/users/sign_in", get(auth::sign_in_form).post(auth::sign_in))
        .route(
            "/users/sign_out",
            post(auth::sign_out).delete(auth::sign_out),
        )
        .route("/users/{id}", get(users::show_user))
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route("/posts/new", get(posts::new_post_form))
        .route(
            "/posts/{id}",
            get(posts::show_post).delete(posts::delete_post),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
