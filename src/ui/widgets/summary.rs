// src/ui/widgets/summary.rs

use crate::app::{App, AppState};
use crate::ui::widgets::analysis_view::severity_style;
use crate::core::models::Severity;
use strum::IntoEnumIterator;
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph},
};

/// Renders the summary widget: overall score, the HTTP status the site
/// answered with and the number of issues per severity. Nothing is drawn until
/// a scan has produced a report.
pub fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let summary_container = Block::default().borders(Borders::ALL).title("Summary");
    frame.render_widget(summary_container, area);

    let summary_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Score & Rating section
            Constraint::Length(1), // Gauge chart
            Constraint::Length(1), // Spacer
            Constraint::Length(2), // Target section
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Issues Found section
        ])
        .split(area);

    let report = match (&app.state, &app.scan_report) {
        (AppState::Finished, Some(report)) => report,
        _ => return,
    };

    // --- Score & Rating Section ---
    let (rating_text, rating_style) = match app.summary.score {
        90..=100 => ("Excellent", Style::default().fg(Color::Green)),
        75..=89 => ("Good", Style::default().fg(Color::Cyan)),
        50..=74 => ("Needs Improvement", Style::default().fg(Color::Yellow)),
        _ => ("Poor", Style::default().fg(Color::Red)),
    };
    let score_line = Line::from(format!("{}/100 ({})", app.summary.score, rating_text)).style(rating_style);
    let score_text = Text::from(vec![Line::from("Overall Score".bold()), score_line]);
    frame.render_widget(Paragraph::new(score_text).alignment(Alignment::Center), summary_chunks[0]);

    let score_gauge = Gauge::default()
        .percent(u16::from(app.summary.score))
        .label("")
        .style(Style::default().fg(rating_style.fg.unwrap_or(Color::White)));
    frame.render_widget(score_gauge, summary_chunks[1]);

    // --- Target Section ---
    let target_text = Text::from(vec![
        Line::from(vec![Span::raw("HTTP status: "), Span::styled(report.status.to_string(), Style::default().bold())]),
        Line::from(report.url.as_str()).fg(Color::DarkGray),
    ]);
    frame.render_widget(Paragraph::new(target_text), summary_chunks[3]);

    // --- Issues Found Section ---
    let issues_block = Block::default().title("ISSUES FOUND".bold());
    // Worst first.
    let lines: Vec<Line> = Severity::iter()
        .rev()
        .map(|severity| {
            Line::from(vec![
                Span::raw(format!("{}: ", severity_label(severity))),
                Span::styled(app.summary.count(severity).to_string(), severity_style(severity)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(issues_block), summary_chunks[5]);
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "High",
        Severity::Medium => "Medium",
        Severity::Low => "Low",
    }
}
