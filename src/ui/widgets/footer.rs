// src/ui/widgets/footer.rs

use crate::app::{App, AppState};
use ratatui::{prelude::*, widgets::Paragraph};

fn key(label: &'static str) -> Span<'static> {
    Span::styled(label, Style::new().bold().fg(Color::Yellow))
}

/// Key hints for the current state. Selection is only offered when the last
/// scan produced issues to move through.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.state {
        AppState::Idle => vec![Span::raw("Type a URL, "), key("Enter"), Span::raw(" scan, "), key("Esc"), Span::raw(" quit")],
        AppState::Scanning => vec![Span::raw("Fetching the site... "), key("Esc"), Span::raw(" quit")],
        AppState::Finished => {
            let mut spans = Vec::new();
            if app.scan_report.as_ref().is_some_and(|report| !report.is_clean()) {
                spans.extend([key("↑↓"), Span::raw(" select issue, ")]);
            }
            spans.extend([key("n"), Span::raw(" new scan, "), key("q"), Span::raw(" quit")]);
            spans
        }
    };

    frame.render_widget(Paragraph::new(Line::from(hints)).alignment(Alignment::Center), area);
}
