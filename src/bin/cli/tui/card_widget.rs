use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};

use super::app_state::TuiState;
use crate::render::terminal::image_label;

pub fn draw(f: &mut Frame, area: Rect, state: &mut TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    let progress_area = chunks[0];
    let card_area = chunks[1];
    state.card_area = Some(card_area);

    let Some(session) = state.app.state.session() else {
        let empty = Paragraph::new("  No study session")
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    };

    let progress = session.progress();
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(format!(" {} ", state.app.state.title()))
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .ratio((progress.percentage() / 100.0).clamp(0.0, 1.0))
        .label(progress.to_string());
    f.render_widget(gauge, progress_area);

    let card = session.current();
    let (side, text, color) = if session.is_flipped() {
        (" Answer ", card.back.as_str(), Color::Green)
    } else {
        (" Question ", card.front.as_str(), Color::Yellow)
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(label) = image_label(card) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(label, Style::default().fg(Color::Cyan))));
    }
    lines.push(Line::from(""));
    let hint = match (session.is_first(), session.is_last()) {
        (true, true) => "only card",
        (true, false) => "first card",
        (false, true) => "last card",
        (false, false) => "",
    };
    if !hint.is_empty() {
        lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))));
    }

    let block = Block::default()
        .title(side)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, card_area);
}
