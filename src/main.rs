use blog_portal::{
    AppState,
    api::{HttpPostApi, PostApiState},
    config::{AppConfig, Env, Mode},
    create_router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Entry point: loads configuration, initializes logging, wires the posts API
/// client into the shared state and serves the router.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    dotenv::dotenv().ok();
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            // Logging is not set up yet; its format depends on the config.
            eprintln!("FATAL: invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    // 2. Logging Filter Setup
    // RUST_LOG wins; otherwise verbose for this crate, quieter for the HTTP stack.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "blog_portal=debug,tower_http=info,axum=info".into());

    // 3. Initialize Logging based on Environment
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!(
        "Application starting in {:?} environment, {:?} mode",
        config.env,
        config.mode
    );
    if config.mode == Mode::Developer {
        tracing::info!("Developer mode: /blog is behind the access gate");
    }

    // 4. Posts API Client
    let api = Arc::new(HttpPostApi::new(&config.api_base_url)) as PostApiState;
    tracing::info!("Posts API at {}", config.api_base_url);

    // 5. Unified State Assembly
    let bind_addr = config.bind_addr;
    let app_state = AppState { api, config };

    // 6. Router and Server Startup
    let app = create_router(app_state);

    let listener = match TcpListener::bind(bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", bind_addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("Blog available at: http://{}/blog", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at: http://{}/swagger-ui", bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
