//! HTTP surface for the zoom transform.
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /` | [`handlers::root`]: service name, version, route list |
//! | `GET /health` | [`handlers::health`] |
//! | `POST /upload-image/` | [`handlers::upload_image`]: multipart `file` + `zoom` |
//! | `POST /upload-frame/` | [`handlers::upload_frame`]: same, for live frames |
//!
//! CORS allows every origin, method and header: the intended client is a
//! phone app on the same LAN, not a browser on the open internet.

pub mod error;
pub mod handlers;

use crate::config::AppConfig;
use crate::imaging::{RustBackend, ZoomConfig};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use error::ApiError;

/// Immutable state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<RustBackend>,
    pub encoding: ZoomConfig,
    pub default_zoom: f64,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: Arc::new(RustBackend::new()),
            encoding: config.zoom.encoding(),
            default_zoom: config.zoom.default_factor,
        }
    }
}

/// Build the router with all routes and layers.
pub fn router(config: &AppConfig) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/upload-image/", post(handlers::upload_image))
        .route("/upload-frame/", post(handlers::upload_frame))
        .layer(DefaultBodyLimit::max(config.server.max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(config))
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: AppConfig) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.server.bind_address()).await?;
    info!(address = %listener.local_addr()?, "hand-zoom listening");

    axum::serve(listener, router(&config))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => {
            warn!(error = %e, "cannot listen for Ctrl-C; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
