// src/ui/widgets/analysis_view.rs

use crate::app::{App, AppState, SPINNER_CHARS};
use crate::core::knowledge_base::{self, FindingCategory};
use crate::core::models::{Issue, Severity};
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

pub fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::High => Style::default().fg(Color::Red),
        Severity::Medium => Style::default().fg(Color::Yellow),
        Severity::Low => Style::default().fg(Color::Cyan),
    }
}

pub fn render_analysis_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let main_block = Block::default()
        .borders(Borders::ALL)
        .title("Scan Results (Navigate with ↑ ↓)");

    if let Some(message) = app.scan_error {
        let text = Text::from(vec![
            Line::from(""),
            Line::from("✗ SCAN FAILED".bold().fg(Color::Red)),
            Line::from(""),
            Line::from(message),
        ]);
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center).block(main_block), area);
        return;
    }

    let report = match (&app.state, &app.scan_report) {
        (AppState::Finished, Some(report)) => report,
        (AppState::Scanning, _) => {
            let spinner_char = SPINNER_CHARS[app.spinner_frame];
            let content = Paragraph::new(Line::from(vec![
                Span::styled(format!("{} ", spinner_char), Style::default().fg(Color::Cyan)),
                Span::raw("Scanning... Please wait."),
            ]))
            .alignment(Alignment::Center);
            frame.render_widget(content.block(main_block), area);
            return;
        }
        _ => {
            let content = Paragraph::new(
                "Enter a URL and the scanner will analyze common security headers.\nPassive analysis only: one request, no attacks.",
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
            frame.render_widget(content.block(main_block), area);
            return;
        }
    };

    if report.is_clean() {
        let text = Text::from(vec![
            Line::from(""),
            Line::from("✓ NO ISSUES FOUND".bold().fg(Color::Green)),
            Line::from(""),
            Line::from("No issues were found for the headers checked here."),
            Line::from("This does not guarantee the site is fully secure, but it's a good start."),
        ]);
        let p = Paragraph::new(text).alignment(Alignment::Center).wrap(Wrap { trim: true });
        frame.render_widget(p.block(main_block), area);
        return;
    }

    let inner_area = main_block.inner(area);
    frame.render_widget(main_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Min(0)])
        .split(inner_area);

    let items: Vec<ListItem> = report.issues.iter().map(issue_item).collect();
    let findings_list = List::new(items)
        .block(Block::default())
        .highlight_style(Style::new().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let selected = app
        .analysis_list_state
        .selected()
        .and_then(|index| report.issues.get(index))
        .cloned();
    frame.render_stateful_widget(findings_list, chunks[0], &mut app.analysis_list_state);

    let detail_block = Block::default().borders(Borders::TOP).title("Details");
    let text = match selected {
        Some(issue) => vec![
            Line::from(vec![
                Span::styled(issue.severity.to_string().to_uppercase(), severity_style(issue.severity).bold()),
                Span::raw(" · "),
                Span::raw(category_of(&issue).map(|c| c.to_string()).unwrap_or_default()),
            ]),
            Line::from(""),
            Line::from("WHAT IT IS:".yellow().bold()),
            Line::from(issue.description),
            Line::from(""),
            Line::from("HOW TO FIX:".yellow().bold()),
            Line::from(issue.recommendation),
        ],
        None => vec![Line::from("Select an item above to see details.")],
    };
    let p = Paragraph::new(text).wrap(Wrap { trim: true }).block(detail_block);
    frame.render_widget(p, chunks[1]);
}

fn category_of(issue: &Issue) -> Option<FindingCategory> {
    knowledge_base::get_rule(issue.id).map(|rule| rule.category)
}

fn issue_item(issue: &Issue) -> ListItem<'static> {
    let category_prefix = match category_of(issue) {
        Some(FindingCategory::Transport) => "[TLS] ",
        Some(FindingCategory::Headers) => "[HTTP] ",
        None => "",
    };

    ListItem::new(Line::from(vec![
        Span::styled(category_prefix, Style::default().fg(Color::DarkGray)),
        Span::styled(format!("[{}] ", issue.severity), severity_style(issue.severity)),
        Span::styled(issue.title, severity_style(issue.severity)),
    ]))
}
