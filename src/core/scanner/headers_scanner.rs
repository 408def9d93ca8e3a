// src/core/scanner/headers_scanner.rs

use tracing::debug;

use crate::core::knowledge_base::{self, Check, Rule};
use crate::core::models::{HeaderSet, Issue};

/// Decides whether a single rule applies to the scanned response.
///
/// Every check is a total predicate: an absent header is an answer, not an
/// error.
fn check_rule(rule: &Rule, url: &str, headers: &HeaderSet) -> bool {
    match rule.check {
        Check::InsecureScheme => !url.starts_with("https://"),
        Check::MissingHeader(name) => !headers.contains(name),
    }
}

/// Evaluates the whole rule catalog against a fetched response.
///
/// Rules are independent of one another and are all evaluated; the returned
/// issues follow catalog order regardless of how the headers were stored.
/// The status code is part of the input because the scan reports on whatever
/// response the server produced (a 404 is analyzed like a 200); no current rule
/// depends on it.
///
/// # Arguments
/// * `url` - The URL exactly as the caller requested it.
/// * `status` - The HTTP status of the final response.
/// * `headers` - The response headers.
pub fn evaluate(url: &str, status: u16, headers: &HeaderSet) -> Vec<Issue> {
    debug!(url, status, header_count = headers.len(), "Evaluating rule catalog.");

    let issues: Vec<Issue> = knowledge_base::rules()
        .iter()
        .filter(|rule| {
            let fired = check_rule(rule, url, headers);
            debug!(rule = rule.id, fired, "Rule evaluated.");
            fired
        })
        .map(Issue::from)
        .collect();

    debug!(issues = issues.len(), "Rule catalog evaluated.");
    issues
}
