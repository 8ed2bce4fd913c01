//! Synthetic network speed-test endpoints.
//!
//! # Responsibilities
//! - Ping: constant body for round-trip latency measurement
//! - Download: fixed-size payload with an exact Content-Length
//! - Upload: stream-consume and discard an arbitrary body
//!
//! # Design Decisions
//! - The download payload is allocated once at startup and shared
//!   read-only; cloning the `Bytes` handle is a refcount bump
//! - Upload bodies are consumed chunk by chunk so peak memory stays
//!   bounded regardless of the configured ceiling
//! - Nothing is timed server-side; measurement is entirely client-driven

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use futures_util::StreamExt;
use serde::Serialize;

use crate::http::response::ApiError;
use crate::http::server::AppState;

/// `GET /api/speedtest/ping` — latency probe.
pub async fn ping() -> &'static str {
    "pong"
}

/// `GET /api/speedtest/download` — fixed-size payload.
///
/// The body length always equals the declared Content-Length exactly;
/// cache-disabling headers keep intermediaries from skewing the
/// measurement.
pub async fn download(State(state): State<AppState>) -> impl IntoResponse {
    let payload = state.download_payload.clone();
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/octet-stream"),
            (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        payload,
    )
}

/// Acknowledgment returned after a fully consumed upload.
#[derive(Debug, Serialize)]
pub struct UploadAck {
    pub success: bool,
    pub message: &'static str,
}

/// `POST /api/speedtest/upload` — discard upload.
///
/// The body is read to completion before the acknowledgment is sent (the
/// client times the transfer), but nothing is stored. Bodies over the
/// configured ceiling are rejected with 413.
pub async fn upload(State(state): State<AppState>, body: Body) -> Result<Json<UploadAck>, ApiError> {
    let limit = state.config.speedtest.upload_limit_bytes;
    let mut stream = body.into_data_stream();
    let mut received: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            tracing::debug!(error = %e, received, "Upload body read failed");
            ApiError::UploadInterrupted
        })?;
        received += chunk.len() as u64;
        if received > limit {
            tracing::debug!(received, limit, "Upload exceeds ceiling");
            return Err(ApiError::PayloadTooLarge);
        }
    }

    tracing::debug!(received, "Upload consumed and discarded");
    Ok(Json(UploadAck {
        success: true,
        message: "Upload received",
    }))
}
