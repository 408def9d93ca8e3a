// src/core/scanner/mod.rs

// The scanner is a two-step pipeline: one fetch, then a pure rule evaluation.
pub mod fetcher;
pub mod headers_scanner;

use tracing::{info, warn};

use crate::core::error::ScanError;
use crate::core::models::{FetchResult, ScanReport, ScanRequest};
use self::fetcher::Fetcher;
use self::headers_scanner::evaluate;

/// Runs one scan: fetches the target once and evaluates every rule against
/// the response.
///
/// A transport failure short-circuits the pipeline; the rule engine is only
/// ever handed a successful response. Scans share nothing but the fetcher, so
/// any number of them may run concurrently.
///
/// # Arguments
///
/// * `fetcher` - The transport used for the single outbound request.
/// * `request` - The validated scan input.
///
/// # Returns
///
/// The `ScanReport` on success, or `ScanError::Fetch` if the target could not
/// be reached at all.
pub async fn run_scan<F: Fetcher>(fetcher: &F, request: &ScanRequest) -> Result<ScanReport, ScanError> {
    let url = request.url();
    info!(url, "Starting scan.");

    match fetcher.fetch(url).await {
        FetchResult::Success { status, headers } => {
            let issues = evaluate(url, status, &headers);
            info!(url, status, issues = issues.len(), "Scan finished.");
            Ok(ScanReport {
                url: url.to_string(),
                status,
                issues,
            })
        }
        FetchResult::Failure { reason } => {
            warn!(url, reason = %reason, "Scan aborted, target unreachable.");
            Err(ScanError::Fetch { reason })
        }
    }
}
