use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Absolute path of the gate's form target, the one route the gate lets through.
pub const ACCESS_PATH: &str = "/blog/access";

/// Blog Router Module
///
/// Routes relative to `/blog`. GET requests all land in `show_blog`, which asks
/// the route selector what to render; the explicit routes only exist to attach
/// the form handlers. Unknown paths fall back to `show_blog` as well so that
/// they render the gate (when locked) or the not-found page.
pub fn blog_routes() -> Router<AppState> {
    Router::new()
        // GET /blog
        // Developer list (authorized developer) or user list (user mode).
        .route("/", get(handlers::show_blog))
        // GET/POST /blog/create
        // Create form and its submission. User mode is redirected to /blog.
        .route(
            "/create",
            get(handlers::show_blog).post(handlers::create_post),
        )
        // GET /blog/posts/{id}
        // Detail view; the id is passed through to the posts API untouched.
        .route("/posts/{id}", get(handlers::show_blog))
        // POST /blog/posts/{id}/delete
        // Developer-only deletion from the list view.
        .route("/posts/{id}/delete", post(handlers::delete_post))
        // POST /blog/access
        // Access Gate password submission.
        .route(
            "/access",
            get(handlers::show_blog).post(handlers::submit_password),
        )
        .fallback(handlers::show_blog)
}
