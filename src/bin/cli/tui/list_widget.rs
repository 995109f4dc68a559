use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use cardbox_lib::flashcards::parse_hex_color;
use cardbox_lib::View;

use super::app_state::{Mode, TuiState};
use crate::render::terminal::{image_label, plural};

/// `#rrggbb` to a terminal color
pub fn hex_color(hex: &str) -> Option<Color> {
    parse_hex_color(hex).map(|(r, g, b)| Color::Rgb(r, g, b))
}

pub fn draw(f: &mut Frame, area: Rect, state: &mut TuiState) {
    let is_active = state.mode == Mode::Browse;
    let app_state = &state.app.state;

    let block = Block::default()
        .title(format!(" {} ", app_state.title()))
        .borders(Borders::ALL)
        .border_style(if is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    let meta = Style::default().fg(Color::DarkGray);
    let items: Vec<ListItem> = match state.view() {
        View::Categories => app_state
            .tree()
            .categories()
            .iter()
            .map(|c| {
                let name_style = Style::default()
                    .fg(hex_color(&c.color).unwrap_or(Color::White))
                    .add_modifier(Modifier::BOLD);
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{} ", c.icon)),
                    Span::styled(c.name.clone(), name_style),
                    Span::styled(
                        format!(
                            "  {} • {}",
                            plural(c.deck_count(), "deck"),
                            plural(c.card_count(), "card")
                        ),
                        meta,
                    ),
                ]))
            })
            .collect(),
        View::Decks => app_state
            .current_category()
            .map(|c| {
                c.decks
                    .iter()
                    .map(|d| {
                        let mut spans = vec![
                            Span::styled(
                                d.name.clone(),
                                Style::default().add_modifier(Modifier::BOLD),
                            ),
                            Span::styled(format!("  {}", plural(d.card_count(), "card")), meta),
                        ];
                        if !d.description.is_empty() {
                            spans.push(Span::styled(
                                format!("  {}", d.description),
                                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
                            ));
                        }
                        ListItem::new(Line::from(spans))
                    })
                    .collect()
            })
            .unwrap_or_default(),
        View::Cards => app_state
            .current_deck()
            .map(|d| {
                d.cards
                    .iter()
                    .enumerate()
                    .map(|(i, card)| {
                        let mut spans = vec![
                            Span::styled(format!("{:>3}. ", i + 1), meta),
                            Span::raw(card.front.clone()),
                            Span::styled(" → ", meta),
                            Span::styled(card.back.clone(), Style::default().fg(Color::Green)),
                        ];
                        if let Some(label) = image_label(card) {
                            spans.push(Span::styled(
                                format!(" {}", label),
                                Style::default().fg(Color::Cyan),
                            ));
                        }
                        ListItem::new(Line::from(spans))
                    })
                    .collect()
            })
            .unwrap_or_default(),
        View::Study => Vec::new(),
    };

    if items.is_empty() {
        let hint = match state.view() {
            View::Categories => "  No categories yet. Press a to create one.",
            View::Decks => "  No decks in this category. Press a to create one.",
            _ => "  No cards in this deck. Press a to add one.",
        };
        let help_text = vec![
            Line::from(""),
            Line::from(Span::styled(hint, meta)),
        ];
        f.render_widget(Paragraph::new(help_text).block(block), area);
        state.list_offset = 0;
        return;
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(if is_active { Color::DarkGray } else { Color::Black })
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default()
        .with_offset(state.list_offset)
        .with_selected(Some(state.selected));

    f.render_stateful_widget(list, area, &mut list_state);
    state.list_offset = list_state.offset();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#6366f1"), Some(Color::Rgb(99, 102, 241)));
        assert_eq!(hex_color("6366f1"), None);
        assert_eq!(hex_color("#zzzzzz"), None);
    }
}
