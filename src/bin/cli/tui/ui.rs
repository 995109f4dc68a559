use ratatui::prelude::*;
use ratatui::layout::{Constraint, Direction, Layout};

use cardbox_lib::View;

use super::app_state::TuiState;
use super::{card_widget, form_popup, list_widget, status_bar};

pub fn draw(f: &mut Frame, state: &mut TuiState) {
    let size = f.area();

    // Main layout: content area + status bar
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(size);

    let main_area = outer[0];
    let status_area = outer[1];

    // Save areas for mouse hit-testing
    if state.view() == View::Study {
        state.list_area = None;
        card_widget::draw(f, main_area, state);
    } else {
        state.card_area = None;
        state.list_area = Some(main_area);
        list_widget::draw(f, main_area, state);
    }

    status_bar::draw(f, status_area, state);

    if let Some(form) = state.form.as_ref() {
        form_popup::draw(f, main_area, form);
    }
}
