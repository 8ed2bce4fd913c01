//! API handlers.
//!
//! Each handler is an independent, stateless transformation of the
//! incoming request; none share mutable state and none call each other.

pub mod client_info;
pub mod speedtest;

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::http::response::ApiError;

/// Diagnostic acknowledgment returned by `GET /api/test`.
#[derive(Debug, Serialize)]
pub struct DiagnosticResponse {
    pub message: &'static str,
    pub timestamp: String,
}

/// `GET /api/test` — constant acknowledgment used to confirm the process
/// is reachable.
pub async fn diagnostic() -> Json<DiagnosticResponse> {
    Json(DiagnosticResponse {
        message: "API is working",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Catch-all 404 handler, registered after every route.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
