// src/ui/widgets/input.rs
use crate::app::{App, AppState};
use ratatui::{layout::Position, prelude::*, widgets::{Block, Borders, Paragraph}};

/// Renders the input box widget.
pub fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let mut input_block = Block::default().borders(Borders::ALL).title("Website URL");
    if let Some(hint) = app.input_error {
        input_block = input_block
            .border_style(Style::default().fg(Color::Red))
            .title_bottom(Line::from(format!(" {hint} ")).fg(Color::Red));
    }
    let input_paragraph = if app.input.is_empty() && matches!(app.state, AppState::Idle) {
        Paragraph::new("https://example.com").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(app.input.as_str()).style(Style::default().fg(Color::Yellow))
    };
    frame.render_widget(input_paragraph.block(input_block), area);

    // Show the cursor only when in the Idle state.
    if let AppState::Idle = app.state {
        let column = u16::try_from(app.input.chars().count()).unwrap_or(u16::MAX);
        frame.set_cursor_position(Position::new(
            area.x.saturating_add(column).saturating_add(1),
            area.y + 1,
        ));
    }
}
