// src/core/models.rs

use reqwest::header::HeaderMap;
use serde::Serialize;
use strum::{Display, EnumIter};

use crate::core::error::ScanError;
use crate::core::knowledge_base::Rule;

// --- Findings ---

// Severity of a finding. Declaration order is the comparison order, so
// `Severity::High > Severity::Low` and sorting by severity works out of the box.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

// A single reported gap. Issues are only ever built from a catalog rule, so all
// text is static.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub id: &'static str,
    pub title: &'static str,
    pub severity: Severity,
    pub description: &'static str,
    pub recommendation: &'static str,
}

impl From<&Rule> for Issue {
    fn from(rule: &Rule) -> Self {
        Self {
            id: rule.id,
            title: rule.title,
            severity: rule.severity,
            description: rule.description,
            recommendation: rule.recommendation,
        }
    }
}

// --- Fetch Models ---

/// Response headers of the scanned site.
///
/// Backed by a `HeaderMap`, which stores names lowercased, so lookups ignore
/// the casing the server used. Only presence matters to the rules: a header
/// sent with an empty value is still present.
#[derive(Debug, Clone, Default)]
pub struct HeaderSet(HeaderMap);

impl HeaderSet {
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name.to_ascii_lowercase().as_str())
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.0.keys_len()
    }
}

impl From<HeaderMap> for HeaderSet {
    fn from(map: HeaderMap) -> Self {
        Self(map)
    }
}

// Fixture builder for tests: `[("x-frame-options", "DENY")].into_iter().collect()`.
#[cfg(test)]
impl<'a> FromIterator<(&'a str, &'a str)> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        use reqwest::header::{HeaderName, HeaderValue};

        let mut map = HeaderMap::new();
        for (name, value) in iter {
            let name = HeaderName::from_bytes(name.as_bytes()).expect("valid header name");
            let value = HeaderValue::from_str(value).expect("valid header value");
            map.append(name, value);
        }
        Self(map)
    }
}

// Outcome of the single outbound request made for a scan.
#[derive(Debug, Clone)]
pub enum FetchResult {
    Success { status: u16, headers: HeaderSet },
    Failure { reason: String },
}

// --- Scan Models ---

// Input of one scan. The url is kept exactly as the caller typed it: the
// HTTPS rule looks at the literal string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    url: String,
}

impl ScanRequest {
    pub fn new(url: impl Into<String>) -> Result<Self, ScanError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(ScanError::MissingUrl);
        }
        Ok(Self { url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

// Result of a successful scan, serialized as-is by the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub url: String,
    pub status: u16,
    pub issues: Vec<Issue>,
}

impl ScanReport {
    /// No rule fired. This is a positive result, not an empty error.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|issue| issue.severity == severity).count()
    }

    pub fn highest_severity(&self) -> Option<Severity> {
        self.issues.iter().map(|issue| issue.severity).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::knowledge_base;
    use strum::IntoEnumIterator;

    #[test]
    fn severity_orders_low_to_high() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        let all: Vec<Severity> = Severity::iter().collect();
        assert_eq!(all, vec![Severity::Low, Severity::Medium, Severity::High]);
    }

    #[test]
    fn severity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"high\"");
        assert_eq!(Severity::Medium.to_string(), "medium");
    }

    #[test]
    fn header_lookup_ignores_case() {
        let headers: HeaderSet = [("Content-Security-Policy", "default-src 'self'")].into_iter().collect();
        assert!(headers.contains("content-security-policy"));
        assert!(headers.contains("CONTENT-SECURITY-POLICY"));
        assert!(headers.contains("Content-Security-Policy"));
        assert!(!headers.contains("x-frame-options"));
    }

    #[test]
    fn empty_header_value_counts_as_present() {
        let headers: HeaderSet = [("x-frame-options", "")].into_iter().collect();
        assert!(headers.contains("X-Frame-Options"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn len_counts_distinct_names() {
        let mut map = HeaderMap::new();
        map.append("set-cookie", "a=1".parse().unwrap());
        map.append("set-cookie", "b=2".parse().unwrap());
        map.append("x-content-type-options", "nosniff".parse().unwrap());
        let headers = HeaderSet::from(map);
        assert_eq!(headers.len(), 2);
        assert!(headers.contains("SET-COOKIE"));
        assert_eq!(HeaderSet::default().len(), 0);
    }

    #[test]
    fn scan_request_rejects_blank_url() {
        assert!(matches!(ScanRequest::new(""), Err(ScanError::MissingUrl)));
        assert!(matches!(ScanRequest::new("   "), Err(ScanError::MissingUrl)));
        let request = ScanRequest::new("HTTPS://example.com").unwrap();
        assert_eq!(request.url(), "HTTPS://example.com");
    }

    #[test]
    fn issue_serializes_all_five_fields() {
        let rule = knowledge_base::get_rule("missing_xfo").unwrap();
        let json = serde_json::to_value(Issue::from(rule)).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 5);
        assert_eq!(object["id"], "missing_xfo");
        assert_eq!(object["title"], "Missing X-Frame-Options");
        assert_eq!(object["severity"], "low");
        assert_eq!(object["recommendation"], "Set X-Frame-Options to DENY or SAMEORIGIN.");
    }

    #[test]
    fn report_counts_by_severity() {
        let issues: Vec<Issue> = knowledge_base::rules().iter().map(Issue::from).collect();
        let report = ScanReport { url: "http://example.com".into(), status: 200, issues };
        assert!(!report.is_clean());
        assert_eq!(report.count(Severity::High), 1);
        assert_eq!(report.count(Severity::Medium), 2);
        assert_eq!(report.count(Severity::Low), 2);
        assert_eq!(report.highest_severity(), Some(Severity::High));

        let clean = ScanReport { url: "https://example.com".into(), status: 200, issues: Vec::new() };
        assert!(clean.is_clean());
        assert_eq!(clean.highest_severity(), None);
    }
}
