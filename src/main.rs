//! Student Ambassador Connect Backend
//!
//! A REST backend with SQLite persistence, click tracking, photo uploads,
//! and a live ambassador snapshot feed.

mod api;
mod auth;
mod config;
mod data;
mod db;
mod errors;
mod events;
mod images;
mod listing;
mod models;
mod storage;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;
use storage::UploadStore;

/// Request body cap for the upload route, slightly above the stored-file cap
/// so oversized files reach the handler's own 400 path.
const UPLOAD_BODY_LIMIT: usize = 12 * 1024 * 1024;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub store: Arc<UploadStore>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Student Ambassador Connect Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Upload directory: {:?}", config.upload_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if PSK is not configured
    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (CONNECT_API_PSK). Authentication is disabled!");
    }
    if !config.tracking_enabled {
        tracing::warn!("Tracking disabled (CONNECT_TRACKING_ENABLED). Track requests are mocked.");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Ensure the upload directory exists before ServeDir points at it
    tokio::fs::create_dir_all(&config.upload_dir).await.ok();
    let store = Arc::new(UploadStore::new(config.upload_dir.clone()));

    // Create application state
    let state = AppState {
        repo,
        store,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone PSK for the auth layer
    let psk = state.config.api_psk.clone();

    // Admin routes behind the PSK layer
    let admin_routes = Router::new()
        // Ambassadors
        .route("/ambassadors", get(api::list_ambassadors))
        .route("/ambassadors", post(api::create_ambassador))
        .route("/ambassadors/import", post(api::import_ambassadors))
        .route("/ambassadors/{id}", get(api::get_ambassador))
        .route("/ambassadors/{id}", put(api::update_ambassador))
        .route("/ambassadors/{id}", delete(api::delete_ambassador))
        .route("/ambassadors/{id}/toggle", post(api::toggle_ambassador))
        // Interaction logs
        .route("/logs", get(api::list_logs))
        .route("/logs/export", get(api::export_logs))
        // Dashboard
        .route("/stats", get(api::get_stats))
        // Uploads
        .route(
            "/upload",
            post(api::upload_photo).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        // Apply PSK auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    // Public routes (no auth, same as the deployed site)
    let public_routes = Router::new()
        .route("/public/ambassadors", get(api::public_ambassadors))
        .route("/public/ambassadors/watch", get(api::watch_ambassadors))
        .route("/track", post(api::track_interaction))
        .route("/proxy-image", get(api::proxy_image));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", admin_routes.merge(public_routes))
        .merge(health_routes)
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
