// src/core/mod.rs

/// Data structures shared by the fetcher, the rule engine and the
/// presentation layers: `Issue`, `Severity`, `HeaderSet`, `ScanReport`.
pub mod models;

/// Error type for a single scan.
pub mod error;

/// Fetching the target and evaluating the rule catalog against it.
pub mod scanner;

/// The fixed, ordered catalog of security rules with their human-readable
/// titles, explanations and remediation advice.
pub mod knowledge_base;
