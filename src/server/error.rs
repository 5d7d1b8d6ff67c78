//! HTTP error mapping.
//!
//! Every failure becomes a JSON body `{"detail": "..."}` with a status code
//! chosen by who is at fault: bad uploads and bad factors are 400, encoder
//! and worker failures are 500.

use crate::imaging::ZoomError;
use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Zoom(#[from] ZoomError),
    #[error("{0}")]
    Multipart(#[from] MultipartError),
    #[error("zoom worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Zoom(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Zoom(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Multipart(e) => e.status(),
            ApiError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();
        if status.is_server_error() {
            error!(%status, %detail, "request failed");
        } else {
            warn!(%status, %detail, "request rejected");
        }
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
