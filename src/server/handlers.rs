// src/server/handlers.rs

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::core::error::ScanError;
use crate::core::models::{ScanReport, ScanRequest};
use crate::core::scanner::{fetcher::Fetcher, run_scan};
use crate::server::{AppState, error::ApiError};

/// Body of `POST /scan`.
#[derive(Debug, Deserialize)]
pub struct ScanRequestBody {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /`: plain-text liveness probe.
pub async fn root() -> &'static str {
    "Server is running"
}

/// `GET /health`: JSON liveness probe.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `POST /scan`: scans the submitted URL.
///
/// A body that is missing, not JSON, or lacks a usable `url` is a bad request
/// and never reaches the fetcher.
pub async fn scan<F: Fetcher>(
    State(state): State<AppState<F>>,
    body: Result<Json<ScanRequestBody>, JsonRejection>,
) -> Result<Json<ScanReport>, ApiError> {
    let url = match body {
        Ok(Json(body)) => body.url,
        Err(rejection) => {
            debug!(error = %rejection, "Rejected scan request body.");
            None
        }
    };
    let request = url.ok_or(ScanError::MissingUrl).and_then(ScanRequest::new)?;

    let report = run_scan(state.fetcher.as_ref(), &request).await.map_err(|e| {
        error!(url = request.url(), error = %e, "Scan failed.");
        ApiError::from(e)
    })?;

    Ok(Json(report))
}
