// src/app.rs

use crate::core::error::ScanError;
use crate::core::models::{ScanReport, Severity};
use ratatui::widgets::ListState;

pub const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub enum AppState {
    Idle,
    Scanning,
    Finished,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub score: u8,
    pub high_issues: usize,
    pub medium_issues: usize,
    pub low_issues: usize,
}

impl ScanSummary {
    pub fn from_report(report: &ScanReport) -> Self {
        let high = report.count(Severity::High);
        let medium = report.count(Severity::Medium);
        let low = report.count(Severity::Low);
        let penalty = high * 15 + medium * 5 + low * 2;

        Self {
            score: 100usize.saturating_sub(penalty) as u8,
            high_issues: high,
            medium_issues: medium,
            low_issues: low,
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::High => self.high_issues,
            Severity::Medium => self.medium_issues,
            Severity::Low => self.low_issues,
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub state: AppState,
    pub input: String,
    /// Why the typed input was not submitted; shown in the input box.
    pub input_error: Option<&'static str>,
    pub scan_report: Option<ScanReport>,
    /// Short, user-facing reason of the last failed scan.
    pub scan_error: Option<&'static str>,
    pub summary: ScanSummary,
    pub analysis_list_state: ListState,
    pub spinner_frame: usize,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            state: AppState::Idle,
            input: String::new(),
            input_error: None,
            scan_report: None,
            scan_error: None,
            summary: ScanSummary::default(),
            analysis_list_state: ListState::default(),
            spinner_frame: 0,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
        self.input_error = None;
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
        self.input_error = None;
    }

    /// Switches to `Scanning` and hands back the URL to scan, or `None` when
    /// there is nothing to scan.
    pub fn start_scan(&mut self) -> Option<String> {
        if self.input.trim().is_empty() {
            self.input_error = Some("Please enter a URL.");
            return None;
        }
        self.input_error = None;
        self.scan_error = None;
        self.state = AppState::Scanning;
        Some(self.input.clone())
    }

    pub fn finish_scan(&mut self, outcome: Result<ScanReport, ScanError>) {
        match outcome {
            Ok(report) => {
                self.summary = ScanSummary::from_report(&report);
                let first = if report.is_clean() { None } else { Some(0) };
                self.analysis_list_state.select(first);
                self.scan_report = Some(report);
                self.scan_error = None;
            }
            Err(e) => {
                self.scan_report = None;
                self.scan_error = Some(e.user_message());
                self.summary = ScanSummary::default();
                self.analysis_list_state.select(None);
            }
        }
        self.state = AppState::Finished;
    }

    fn issue_count(&self) -> usize {
        self.scan_report.as_ref().map_or(0, |report| report.issues.len())
    }

    pub fn select_previous(&mut self) {
        if self.issue_count() == 0 {
            return;
        }
        let index = self.analysis_list_state.selected().unwrap_or(0);
        self.analysis_list_state.select(Some(index.saturating_sub(1)));
    }

    pub fn select_next(&mut self) {
        let count = self.issue_count();
        if count == 0 {
            return;
        }
        let index = self.analysis_list_state.selected().map_or(0, |i| (i + 1).min(count - 1));
        self.analysis_list_state.select(Some(index));
    }

    pub fn on_tick(&mut self) {
        if let AppState::Scanning = self.state {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_CHARS.len();
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
