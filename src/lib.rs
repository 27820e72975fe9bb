use axum::{
    Router,
    extract::{FromRef, OriginalUri, Request, State},
    http::{HeaderName, Method},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core: the Access Gate and the Route Selector.
pub mod gate;
pub mod navigation;

// Application services and components.
pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod views;

// Module for routing segregation (Public, Blog).
pub mod routes;
use routes::{blog, public};

use gate::AuthState;
use navigation::{BLOG_PREFIX, BlogState, View};

// --- Public Re-exports ---

pub use api::{HttpPostApi, MockPostApi, PostApiState};
pub use config::{AppConfig, Mode};

/// ApiDoc
///
/// Auto-generated OpenAPI description of the blog's HTTP surface, served at
/// `/api-docs/openapi.json` and browsable through Swagger UI.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::show_blog, handlers::submit_password,
        handlers::create_post, handlers::delete_post
    ),
    components(
        schemas(models::Post, models::CreatePostRequest, models::PasswordForm)
    ),
    tags(
        (name = "blog-portal", description = "Blog front end with developer access gate")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, immutable container shared by every request: the posts API
/// handle and the loaded configuration. Authorization is never stored here;
/// it travels with each request in the session cookie.
#[derive(Clone)]
pub struct AppState {
    /// Posts collaborator: HTTP client in production, mock in tests.
    pub api: PostApiState,
    /// Configuration: the loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for PostApiState {
    fn from_ref(app_state: &AppState) -> PostApiState {
        app_state.api.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// gate_middleware
///
/// Enforces the Access Gate over the whole blog subtree. While developer mode
/// is locked, every request except the password submission itself is answered
/// with the gate, before any blog route is resolved. Unlocked or user-mode
/// requests pass through untouched.
async fn gate_middleware(
    State(state): State<AppState>,
    auth: AuthState,
    OriginalUri(uri): OriginalUri,
    request: Request,
    next: Next,
) -> Response {
    let is_submission = request.method() == Method::POST && uri.path() == blog::ACCESS_PATH;

    if BlogState::new(state.config.mode, auth) == BlogState::Locked && !is_submission {
        tracing::debug!(path = %uri.path(), "blog locked, showing access gate");
        return match handlers::render_view(&state, View::Gate, uri.path()).await {
            Ok(response) => response,
            Err(e) => e.into_response(),
        };
    }

    next.run(request).await
}

/// create_router
///
/// Assembles the routing structure, applies the gate and the observability
/// layers, and registers the application state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Documentation: Serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public Routes: No gate.
        .merge(public::public_routes())
        // Blog Routes: every path (fallback included) sits behind the gate.
        // Mounted as a service so `/blog/` is matched along with `/blog`.
        .nest_service(
            BLOG_PREFIX,
            blog::blog_routes()
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    gate_middleware,
                ))
                .with_state::<()>(state.clone()),
        )
        .with_state(state);

    // 3. Observability and Correlation Layers
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID Generation: a UUID for every incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. Request Tracing: one span per request, tagged with the request ID.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Request ID Propagation: echo x-request-id back to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS Layer
        .layer(cors)
}

/// trace_span_logger
///
/// Builds the per-request tracing span, correlating every log line of a
/// request through its `x-request-id`.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
