// src/main.rs

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::process::ExitCode;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

mod app;
mod config;
mod core;
mod logging;
mod server;
mod ui;

use app::{App, AppState};
use config::{Cli, Command};
use crate::core::error::ScanError;
use crate::core::models::{ScanReport, ScanRequest};
use crate::core::scanner::fetcher::{FetchConfig, HttpFetcher};
use crate::core::scanner::run_scan;
use logging::LogOutput;
use server::ServerConfig;

type ScanOutcome = Result<ScanReport, ScanError>;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let fetch_config = FetchConfig::from(&cli.fetch);

    match cli.command() {
        Command::Serve => {
            logging::initialize_logging(LogOutput::Stderr)?;
            info!(version = env!("CARGO_PKG_VERSION"), "sitescan starting.");
            let fetcher = HttpFetcher::new(&fetch_config)?;
            server::serve(&ServerConfig::from(&cli.serve), fetcher).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Scan { url, json } => {
            logging::initialize_logging(LogOutput::Stderr)?;
            let fetcher = HttpFetcher::new(&fetch_config)?;
            Ok(scan_once(&fetcher, url, json).await?)
        }
        Command::Tui => {
            logging::initialize_logging(LogOutput::File)?;
            let fetcher = HttpFetcher::new(&fetch_config)?;
            run_tui(fetcher).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Runs one scan and prints the report to stdout.
async fn scan_once(fetcher: &HttpFetcher, url: String, json: bool) -> Result<ExitCode> {
    let outcome = match ScanRequest::new(url) {
        Ok(request) => run_scan(fetcher, &request).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(report) if json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::SUCCESS)
        }
        Ok(report) => {
            print!("{}", render_text_report(&report));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("error: {}", e.user_message());
            Ok(ExitCode::from(exit_status(&e)))
        }
    }
}

/// 2 for unusable input, 1 when the target could not be scanned.
fn exit_status(err: &ScanError) -> u8 {
    if err.is_bad_input() { 2 } else { 1 }
}

/// Plain-text rendering of a report for the `scan` subcommand.
fn render_text_report(report: &ScanReport) -> String {
    let mut out = format!("Scan results for {} (HTTP status: {})\n", report.url, report.status);
    if report.is_clean() {
        out.push_str(
            "No issues were found for the headers checked here. This does not guarantee the site is fully secure, but it's a good start.\n",
        );
        return out;
    }
    if let Some(worst) = report.highest_severity() {
        out.push_str(&format!("{} issue(s) found, highest severity: {}\n", report.issues.len(), worst));
    }
    for issue in &report.issues {
        out.push_str(&format!("\n[{}] {} ({})\n", issue.severity, issue.title, issue.id));
        out.push_str(&format!("    {}\n", issue.description));
        out.push_str(&format!("    Recommendation: {}\n", issue.recommendation));
    }
    out
}

async fn run_tui(fetcher: HttpFetcher) -> Result<()> {
    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, fetcher).await;

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}

async fn event_loop<B: Backend>(terminal: &mut Terminal<B>, fetcher: HttpFetcher) -> Result<()> {
    let mut app = App::new();
    let (tx, mut rx) = mpsc::channel(1);

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        if event::poll(Duration::from_millis(100))? {
            handle_events(&mut app, &tx, &fetcher)?;
        }

        if let Ok(outcome) = rx.try_recv() {
            app.finish_scan(outcome);
        }
        app.on_tick();
    }
    Ok(())
}

fn handle_events(app: &mut App, tx: &mpsc::Sender<ScanOutcome>, fetcher: &HttpFetcher) -> Result<()> {
    if let Event::Key(key) = event::read()? {
        if key.kind == KeyEventKind::Press {
            match app.state {
                AppState::Idle => handle_idle_input(app, key.code, tx, fetcher),
                AppState::Finished => handle_finished_input(app, key.code),
                AppState::Scanning => {
                    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                        app.quit();
                    }
                }
            }
        }
    }
    Ok(())
}

/// Input while the user is typing a URL. `q` is a valid URL character here,
/// so quitting is bound to Esc.
fn handle_idle_input(app: &mut App, key_code: KeyCode, tx: &mpsc::Sender<ScanOutcome>, fetcher: &HttpFetcher) {
    match key_code {
        KeyCode::Esc => app.quit(),
        KeyCode::Char(c) => app.push_char(c),
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Enter => {
            let Some(url) = app.start_scan() else { return };
            let tx = tx.clone();
            let fetcher = fetcher.clone();
            tokio::spawn(async move {
                let outcome = match ScanRequest::new(url) {
                    Ok(request) => run_scan(&fetcher, &request).await,
                    Err(e) => Err(e),
                };
                let _ = tx.send(outcome).await;
            });
        }
        _ => {}
    }
}

fn handle_finished_input(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('n') => app.reset(),
        KeyCode::Up => app.select_previous(),
        KeyCode::Down => app.select_next(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::knowledge_base;
    use crate::core::models::Issue;

    #[test]
    fn text_report_lists_issues_in_order() {
        let report = ScanReport {
            url: "http://example.com".into(),
            status: 404,
            issues: knowledge_base::rules().iter().take(2).map(Issue::from).collect(),
        };
        let text = render_text_report(&report);
        assert!(text.starts_with("Scan results for http://example.com (HTTP status: 404)"));
        let https = text.find("[high] The site does not use HTTPS (no_https)").unwrap();
        let csp = text.find("[medium] Missing Content-Security-Policy (CSP) (missing_csp)").unwrap();
        assert!(https < csp);
        assert!(text.contains("2 issue(s) found, highest severity: high"));
        assert!(text.contains("Recommendation: Add a Content-Security-Policy header"));
    }

    #[test]
    fn text_report_for_clean_site_is_positive() {
        let report = ScanReport { url: "https://example.com".into(), status: 200, issues: Vec::new() };
        let text = render_text_report(&report);
        assert!(text.contains("No issues were found"));
        assert!(!text.contains("error"));
    }

    #[test]
    fn exit_status_separates_bad_input_from_failure() {
        assert_eq!(exit_status(&ScanError::MissingUrl), 2);
        assert_eq!(exit_status(&ScanError::Fetch { reason: "timeout".into() }), 1);
    }
}
