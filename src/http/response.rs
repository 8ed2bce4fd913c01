//! Error-to-response mapping at the HTTP boundary.
//!
//! # Responsibilities
//! - Define the tagged error kinds handlers can return
//! - Convert each kind into a status code and a uniform JSON body
//!
//! # Design Decisions
//! - Every failure body has the shape `{"success": false, "error": ...}`
//! - Internal faults never echo their cause to the caller; details go to
//!   the log at the point of failure

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Error kinds crossing the HTTP boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// No route matched the request.
    #[error("Endpoint not found")]
    NotFound,

    /// Upload body exceeded the configured ceiling.
    #[error("Upload exceeds the configured size limit")]
    PayloadTooLarge,

    /// Upload body could not be read to completion.
    #[error("Upload body could not be read")]
    UploadInterrupted,

    /// Unexpected fault during response assembly.
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::UploadInterrupted => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body used for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::PayloadTooLarge.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(ApiError::UploadInterrupted.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_body_is_exact() {
        let body = serde_json::to_string(&ErrorBody {
            success: false,
            error: ApiError::NotFound.to_string(),
        })
        .unwrap();
        assert_eq!(body, r#"{"success":false,"error":"Endpoint not found"}"#);
    }

    #[test]
    fn internal_error_is_generic() {
        // The message is fixed; no internal detail rides along.
        assert_eq!(ApiError::Internal.to_string(), "Internal server error");
    }
}
