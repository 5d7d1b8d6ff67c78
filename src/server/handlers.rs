//! Route handlers.
//!
//! `/upload-image/` (gallery mode, one-off uploads) and `/upload-frame/`
//! (live mode, a client posting camera frames in a loop) share one code path;
//! only the log label differs.

use super::AppState;
use super::error::ApiError;
use crate::zoom_source::{FixedFactor, zoom_with};
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use std::time::Instant;
use tracing::info;

/// Name reported by `GET /`.
pub const SERVICE_NAME: &str = "Hand-Zoom Backend";

/// Multipart field carrying the image bytes.
const FILE_FIELD: &str = "file";
/// Multipart field carrying the zoom factor as text.
const ZOOM_FIELD: &str = "zoom";

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "routes": {
            "health": "GET /health",
            "gallery": "POST /upload-image/ (form-data: file, zoom)",
            "live_frame": "POST /upload-frame/ (form-data: file, zoom)",
        }
    }))
}

pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    zoom_upload(state, multipart, "gallery").await
}

pub async fn upload_frame(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    zoom_upload(state, multipart, "live_frame").await
}

/// Fields pulled out of one multipart upload.
#[derive(Debug)]
struct Upload {
    file: Bytes,
    zoom: f64,
}

async fn read_upload(mut multipart: Multipart, default_zoom: f64) -> Result<Upload, ApiError> {
    let mut file = None;
    let mut zoom = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FILE_FIELD => file = Some(field.bytes().await?),
            ZOOM_FIELD => {
                if let Some(value) = parse_zoom(&field.text().await?)? {
                    zoom = Some(value);
                }
            }
            // Unknown fields are drained and ignored.
            _ => {}
        }
    }

    let file =
        file.ok_or_else(|| ApiError::BadRequest(format!("missing form field: {FILE_FIELD}")))?;
    Ok(Upload {
        file,
        zoom: zoom.unwrap_or(default_zoom),
    })
}

/// Parse the `zoom` field. A blank value counts as not sent.
fn parse_zoom(raw: &str) -> Result<Option<f64>, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ApiError::BadRequest(format!("zoom must be a number, got {raw:?}")))
}

async fn zoom_upload(
    state: AppState,
    multipart: Multipart,
    mode: &'static str,
) -> Result<Response, ApiError> {
    let upload = read_upload(multipart, state.default_zoom).await?;
    let started = Instant::now();
    let input_bytes = upload.file.len();
    let zoom = upload.zoom;

    let backend = state.backend.clone();
    let encoding = state.encoding;
    let output = tokio::task::spawn_blocking(move || {
        zoom_with(
            backend.as_ref(),
            &upload.file,
            &FixedFactor(upload.zoom),
            &encoding,
        )
    })
    .await??;

    info!(
        mode,
        zoom,
        input_bytes,
        output_bytes = output.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "zoomed upload"
    );

    Ok(([(header::CONTENT_TYPE, "image/jpeg")], output).into_response())
}
