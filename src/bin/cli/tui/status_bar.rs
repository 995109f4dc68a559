use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use cardbox_lib::{NoticeLevel, View};

use super::app_state::{Mode, TuiState};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    if let Some(ref msg) = state.flash_message {
        let flash = Paragraph::new(format!(" {}", msg))
            .style(Style::default().bg(Color::Red).fg(Color::White));
        f.render_widget(flash, area);
        return;
    }

    if let Some(pending) = state.pending_delete.as_ref().filter(|_| state.mode == Mode::Confirm) {
        let prompt = Paragraph::new(format!(" {} (y/N)", pending.message))
            .style(Style::default().bg(Color::Red).fg(Color::White).add_modifier(Modifier::BOLD));
        f.render_widget(prompt, area);
        return;
    }

    if let Some(notice) = state.app.state.notice() {
        let bg = match notice.level {
            NoticeLevel::Success => Color::Green,
            NoticeLevel::Error => Color::Red,
        };
        let flash = Paragraph::new(format!(" {}", notice.message))
            .style(Style::default().bg(bg).fg(Color::Black));
        f.render_widget(flash, area);
        return;
    }

    let hints = match (&state.mode, state.view()) {
        (Mode::Form, _) => " Tab: next field  Enter: save  Esc: cancel ",
        (_, View::Study) => {
            " Space: flip  ←/→: prev/next  r: shuffle  swipe with the mouse  Esc: back  q: quit "
        }
        (_, View::Categories) => {
            " j/k: navigate  Enter: open  a: add  e: edit  d: delete  q: quit "
        }
        (_, View::Decks) => {
            " Enter: open  s: study  a: add  e: edit  d: delete  Esc: back  q: quit "
        }
        (_, View::Cards) => " s: study  a: add  e: edit  d: delete  Esc: back  q: quit ",
    };

    let status = Paragraph::new(hints)
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(status, area);
}
