//! The rule catalog of the scanner.
//!
//! Every finding the engine can produce is described here once, as data: its
//! stable id, what triggers it, how severe it is and how to fix it. The engine
//! walks this table in order, so adding a rule means adding an entry, not
//! touching control flow.

use crate::core::models::Severity;
use std::fmt;

/// High-level grouping of findings, used to label them in the terminal UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FindingCategory {
    /// How the site is reached (scheme of the requested URL).
    Transport,
    /// Browser-enforced policies sent as response headers.
    Headers,
}

impl fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingCategory::Transport => write!(f, "Transport Security"),
            FindingCategory::Headers => write!(f, "HTTP Security Headers"),
        }
    }
}

/// The condition under which a rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// The requested URL does not start with the literal `https://` prefix.
    /// This is a case-sensitive test on the string the caller supplied.
    InsecureScheme,
    /// The named response header is absent (its value is never inspected).
    MissingHeader(&'static str),
}

/// A single entry of the catalog.
#[derive(Debug)]
pub struct Rule {
    /// Stable, lowercase snake-case identifier (e.g. "missing_csp").
    pub id: &'static str,
    /// Short, human-readable summary.
    pub title: &'static str,
    pub category: FindingCategory,
    pub severity: Severity,
    /// Why the gap matters.
    pub description: &'static str,
    /// What to do about it.
    pub recommendation: &'static str,
    pub check: Check,
}

/// The catalog, in evaluation order. The order is part of the output
/// contract: issues are always reported in this sequence.
static RULES: &[Rule] = &[
    Rule {
        id: "no_https",
        title: "The site does not use HTTPS",
        category: FindingCategory::Transport,
        severity: Severity::High,
        description: "The website is accessible over unencrypted HTTP, which allows attackers to intercept or modify data.",
        recommendation: "Install an SSL certificate (e.g., Let's Encrypt) and redirect all traffic to HTTPS.",
        check: Check::InsecureScheme,
    },
    Rule {
        id: "missing_csp",
        title: "Missing Content-Security-Policy (CSP)",
        category: FindingCategory::Headers,
        severity: Severity::Medium,
        description: "CSP helps prevent XSS attacks by restricting which sources are allowed to load scripts and resources.",
        recommendation: "Add a Content-Security-Policy header that only allows trusted domains.",
        check: Check::MissingHeader("content-security-policy"),
    },
    Rule {
        id: "missing_hsts",
        title: "Missing Strict-Transport-Security (HSTS)",
        category: FindingCategory::Headers,
        severity: Severity::Medium,
        description: "HSTS forces browsers to use HTTPS on future visits, improving transport security.",
        recommendation: "Add a Strict-Transport-Security header with a long max-age and includeSubDomains if needed.",
        check: Check::MissingHeader("strict-transport-security"),
    },
    Rule {
        id: "missing_xfo",
        title: "Missing X-Frame-Options",
        category: FindingCategory::Headers,
        severity: Severity::Low,
        description: "Without this header, the site can be embedded inside an iframe, allowing clickjacking attacks.",
        recommendation: "Set X-Frame-Options to DENY or SAMEORIGIN.",
        check: Check::MissingHeader("x-frame-options"),
    },
    Rule {
        id: "missing_xcto",
        title: "Missing X-Content-Type-Options",
        category: FindingCategory::Headers,
        severity: Severity::Low,
        description: "Without this header, browsers may guess MIME types incorrectly (MIME sniffing), enabling attacks.",
        recommendation: "Add X-Content-Type-Options: nosniff to all static file responses.",
        check: Check::MissingHeader("x-content-type-options"),
    },
];

/// All rules, in evaluation order.
pub fn rules() -> &'static [Rule] {
    RULES
}

/// Looks up a rule by its id.
pub fn get_rule(id: &str) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_order_is_fixed() {
        let ids: Vec<&str> = rules().iter().map(|rule| rule.id).collect();
        assert_eq!(ids, ["no_https", "missing_csp", "missing_hsts", "missing_xfo", "missing_xcto"]);
    }

    #[test]
    fn ids_are_unique_snake_case() {
        let ids: HashSet<&str> = rules().iter().map(|rule| rule.id).collect();
        assert_eq!(ids.len(), rules().len());
        for id in ids {
            assert!(id.chars().all(|c| c.is_ascii_lowercase() || c == '_'), "bad id {id}");
        }
    }

    #[test]
    fn severities_match_catalog() {
        let severity = |id| get_rule(id).map(|rule| rule.severity);
        assert_eq!(severity("no_https"), Some(Severity::High));
        assert_eq!(severity("missing_csp"), Some(Severity::Medium));
        assert_eq!(severity("missing_hsts"), Some(Severity::Medium));
        assert_eq!(severity("missing_xfo"), Some(Severity::Low));
        assert_eq!(severity("missing_xcto"), Some(Severity::Low));
        assert!(get_rule("missing_referrer_policy").is_none());
    }

    #[test]
    fn header_checks_use_lowercase_names() {
        for rule in rules() {
            if let Check::MissingHeader(name) = rule.check {
                assert_eq!(name, name.to_ascii_lowercase());
                assert_eq!(rule.category, FindingCategory::Headers);
            }
        }
    }
}
