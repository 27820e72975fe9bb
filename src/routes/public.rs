use crate::{AppState, navigation::BLOG_PREFIX};
use axum::{Router, response::Redirect, routing::get};

/// Public Router Module
///
/// Endpoints that sit outside the blog subtree and never consult the gate.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Unauthenticated liveness probe for monitoring and load balancers.
        .route("/health", get(|| async { "ok" }))
        // GET /
        // The blog is the only application surface.
        .route("/", get(|| async { Redirect::to(BLOG_PREFIX) }))
}
