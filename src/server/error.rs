// src/server/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::core::error::ScanError;

/// Errors returned by the HTTP API.
///
/// The body is always `{"error": "<short message>"}`; transport details of a
/// failed fetch never reach the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(&'static str),

    #[error("scan failed")]
    ScanFailed(#[source] ScanError),
}

impl From<ScanError> for ApiError {
    fn from(err: ScanError) -> Self {
        if err.is_bad_input() {
            ApiError::BadRequest(err.user_message())
        } else {
            ApiError::ScanFailed(err)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, *msg),
            ApiError::ScanFailed(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.user_message()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
