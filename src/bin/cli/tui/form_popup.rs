use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::app_state::Form;

pub fn draw(f: &mut Frame, area: Rect, form: &Form) {
    // Two rows per field plus borders
    let height = (form.fields.len() as u16 * 2 + 2).min(area.height);
    let width = area.width.saturating_sub(4).min(72);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    // Clear the area behind the popup
    f.render_widget(Clear, popup);

    let mut lines = Vec::new();
    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focus;
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(Span::styled(format!("{}:", field.label), label_style)));
        lines.push(Line::from(format!("  {}", field.value)));
    }

    let block = Block::default()
        .title(form.title())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    f.render_widget(Paragraph::new(lines).block(block), popup);

    // Set cursor position
    if let Some(field) = form.fields.get(form.focus) {
        let cursor_x = popup.x + 3 + field.value.chars().count() as u16;
        let cursor_y = popup.y + 2 + form.focus as u16 * 2;
        let max_x = popup.x + popup.width.saturating_sub(2);
        f.set_cursor_position(Position::new(cursor_x.min(max_x), cursor_y));
    }
}
