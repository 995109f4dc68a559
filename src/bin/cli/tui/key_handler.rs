use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use cardbox_lib::{Action, View};

use super::app_state::{Mode, TuiState};

pub fn handle_key(state: &mut TuiState, key: KeyEvent) {
    // Clear flash message on any keypress
    state.flash_message = None;

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        state.quit = true;
        return;
    }

    match state.mode {
        Mode::Browse if state.view() == View::Study => handle_study_key(state, key),
        Mode::Browse => handle_list_key(state, key),
        Mode::Form => handle_form_key(state, key),
        Mode::Confirm => handle_confirm_key(state, key),
    }
}

fn handle_list_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => state.quit = true,
        KeyCode::Char('j') | KeyCode::Down => state.move_down(),
        KeyCode::Char('k') | KeyCode::Up => state.move_up(),
        KeyCode::Char('g') | KeyCode::Home => state.go_top(),
        KeyCode::Char('G') | KeyCode::End => state.go_bottom(),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => state.open_selected(),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Esc | KeyCode::Backspace => state.back(),
        KeyCode::Char('a') => state.open_add_form(),
        KeyCode::Char('e') => state.open_edit_form(),
        KeyCode::Char('d') => state.request_delete(),
        KeyCode::Char('s') => state.start_study(),
        _ => {}
    }
}

fn handle_study_key(state: &mut TuiState, key: KeyEvent) {
    let action = match key.code {
        KeyCode::Char('q') => {
            state.quit = true;
            return;
        }
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Up | KeyCode::Down => Action::Flip,
        KeyCode::Right | KeyCode::Char('n') => Action::NextCard,
        KeyCode::Left | KeyCode::Char('p') => Action::PreviousCard,
        KeyCode::Char('r') => Action::Shuffle,
        KeyCode::Char('h') | KeyCode::Esc | KeyCode::Backspace => Action::Back,
        _ => return,
    };
    state.dispatch(action);
}

fn handle_form_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => state.cancel_form(),
        KeyCode::Enter => state.submit_form(),
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = state.form.as_mut() {
                form.focus_next();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = state.form.as_mut() {
                form.focus_previous();
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = state.form.as_mut() {
                form.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = state.form.as_mut() {
                form.push(c);
            }
        }
        _ => {}
    }
}

fn handle_confirm_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => state.confirm_delete(),
        _ => state.cancel_delete(),
    }
}

pub fn handle_mouse(state: &mut TuiState, mouse: MouseEvent) {
    if state.mode != Mode::Browse {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => state.pointer_down(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => state.pointer_up(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => {
            if state.view() == View::Study {
                state.dispatch(Action::NextCard);
            } else {
                state.move_down();
            }
        }
        MouseEventKind::ScrollUp => {
            if state.view() == View::Study {
                state.dispatch(Action::PreviousCard);
            } else {
                state.move_up();
            }
        }
        _ => {}
    }
}
