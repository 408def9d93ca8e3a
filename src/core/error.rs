// src/core/error.rs

use thiserror::Error;

/// Everything that can stop a scan from producing a `ScanReport`.
///
/// Rule evaluation itself never fails, so every variant here is raised either
/// before the fetch (bad input) or by the transport.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("URL is required")]
    MissingUrl,

    #[error("failed to fetch URL: {reason}")]
    Fetch { reason: String },
}

impl ScanError {
    /// Short text that is safe to show to an end user. Transport details
    /// stay in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            ScanError::MissingUrl => "URL is required",
            ScanError::Fetch { .. } => "Failed to fetch URL",
        }
    }

    pub fn is_bad_input(&self) -> bool {
        matches!(self, ScanError::MissingUrl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_hides_transport_reason() {
        let err = ScanError::Fetch { reason: "dns error: failed to lookup address information".into() };
        assert_eq!(err.user_message(), "Failed to fetch URL");
        assert!(err.to_string().contains("dns error"));
        assert!(!err.is_bad_input());
    }

    #[test]
    fn missing_url_is_bad_input() {
        assert!(ScanError::MissingUrl.is_bad_input());
        assert_eq!(ScanError::MissingUrl.user_message(), "URL is required");
    }
}
