// src/ui/widgets/mod.rs

pub mod analysis_view; // Findings list and the details of the selected one.
pub mod footer;        // Key hints for the current state.
pub mod input;         // The URL input field.
pub mod summary;       // Score, HTTP status and per-severity counts.
