use std::path::Path;
use std::time::{Duration, Instant};

use ratatui::prelude::Rect;

use cardbox_lib::study::{Gesture, TouchPoint};
use cardbox_lib::{Action, EntityKind, View};

use crate::app::App;

/// Terminal cells are mapped to rough pixel units so the swipe thresholds
/// keep their meaning.
const CELL_WIDTH_PX: f64 = 8.0;
const CELL_HEIGHT_PX: f64 = 16.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Browse,
    Form,
    Confirm,
}

#[derive(Debug, Clone)]
pub enum FormKind {
    NewCategory,
    EditCategory { id: String },
    NewDeck { category_id: String },
    EditDeck { category_id: String, deck_id: String },
    NewCard { deck_id: String },
    EditCard { deck_id: String, card_id: String, image: Option<String> },
}

#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct Form {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub focus: usize,
}

impl Form {
    fn new(kind: FormKind, fields: Vec<(&'static str, String)>) -> Self {
        Self {
            kind,
            fields: fields
                .into_iter()
                .map(|(label, value)| FormField { label, value })
                .collect(),
            focus: 0,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            FormKind::NewCategory => " New category ",
            FormKind::EditCategory { .. } => " Edit category ",
            FormKind::NewDeck { .. } => " New deck ",
            FormKind::EditDeck { .. } => " Edit deck ",
            FormKind::NewCard { .. } => " New card ",
            FormKind::EditCard { .. } => " Edit card ",
        }
    }

    fn value(&self, index: usize) -> String {
        self.fields.get(index).map(|f| f.value.clone()).unwrap_or_default()
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len().max(1);
    }

    pub fn focus_previous(&mut self) {
        let len = self.fields.len().max(1);
        self.focus = (self.focus + len - 1) % len;
    }

    pub fn push(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
        }
    }

    pub fn pop(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }
}

/// A delete waiting for `y`
#[derive(Debug, Clone)]
pub struct PendingDelete {
    pub message: String,
    pub action: Action,
}

pub struct TuiState {
    pub app: App,
    pub mode: Mode,

    pub selected: usize,
    /// First visible row, kept in sync by the list widget
    pub list_offset: usize,
    pub form: Option<Form>,
    pub pending_delete: Option<PendingDelete>,

    /// TUI-side problems that never reach the app state (bad image path)
    pub flash_message: Option<String>,
    notice_shown_at: Option<Instant>,

    // Panel areas for mouse hit-testing (updated each draw)
    pub list_area: Option<Rect>,
    pub card_area: Option<Rect>,

    started: Instant,
    pub quit: bool,
}

impl TuiState {
    pub fn new(app: App) -> Self {
        Self {
            app,
            mode: Mode::Browse,
            selected: 0,
            list_offset: 0,
            form: None,
            pending_delete: None,
            flash_message: None,
            notice_shown_at: None,
            list_area: None,
            card_area: None,
            started: Instant::now(),
            quit: false,
        }
    }

    pub fn view(&self) -> View {
        self.app.state.view()
    }

    /// Apply an action. Rejections surface through the app state's notice.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let before = self.view();
        let result = self.app.state.dispatch(action);
        if self.app.state.notice().is_some() {
            self.notice_shown_at = Some(Instant::now());
        }
        if self.view() != before {
            self.selected = 0;
        }
        self.clamp_selection();
        match result {
            Ok(()) => true,
            Err(e) => {
                log::debug!("TUI action failed: {}", e);
                false
            }
        }
    }

    /// Expire the notice after the configured time
    pub fn tick(&mut self) {
        let ttl = Duration::from_millis(self.app.config.notice_ttl_ms);
        if let Some(shown) = self.notice_shown_at {
            if shown.elapsed() >= ttl {
                self.app.state.clear_notice();
                self.notice_shown_at = None;
            }
        }
    }

    // ==================== Lists ====================

    /// (id, label) rows of the current list view
    pub fn rows(&self) -> Vec<(String, String)> {
        let state = &self.app.state;
        match self.view() {
            View::Categories => state
                .tree()
                .categories()
                .iter()
                .map(|c| (c.id.clone(), c.name.clone()))
                .collect(),
            View::Decks => state
                .current_category()
                .map(|c| c.decks.iter().map(|d| (d.id.clone(), d.name.clone())).collect())
                .unwrap_or_default(),
            View::Cards => state
                .current_deck()
                .map(|d| d.cards.iter().map(|c| (c.id.clone(), c.front.clone())).collect())
                .unwrap_or_default(),
            View::Study => Vec::new(),
        }
    }

    pub fn selected_id(&self) -> Option<String> {
        self.rows().into_iter().nth(self.selected).map(|(id, _)| id)
    }

    fn clamp_selection(&mut self) {
        let len = self.rows().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    pub fn move_down(&mut self) {
        let len = self.rows().len();
        if len > 0 && self.selected < len - 1 {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn go_top(&mut self) {
        self.selected = 0;
    }

    pub fn go_bottom(&mut self) {
        self.selected = self.rows().len().saturating_sub(1);
    }

    /// Descend into the selected row
    pub fn open_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        match self.view() {
            View::Categories => {
                self.dispatch(Action::SelectCategory(id));
            }
            View::Decks => {
                self.dispatch(Action::SelectDeck(id));
            }
            View::Cards => {
                self.dispatch(Action::EnterStudy);
            }
            View::Study => {}
        }
    }

    pub fn back(&mut self) {
        self.dispatch(Action::Back);
    }

    /// From the deck list, study the selected deck; from the card list, its deck
    pub fn start_study(&mut self) {
        match self.view() {
            View::Decks => {
                if let Some(id) = self.selected_id() {
                    if self.dispatch(Action::SelectDeck(id)) {
                        self.dispatch(Action::EnterStudy);
                    }
                }
            }
            View::Cards => {
                self.dispatch(Action::EnterStudy);
            }
            _ => {}
        }
    }

    // ==================== Forms ====================

    pub fn open_add_form(&mut self) {
        let config = &self.app.config;
        let form = match self.view() {
            View::Categories => Form::new(
                FormKind::NewCategory,
                vec![
                    ("Name", String::new()),
                    ("Color", config.default_color.clone()),
                    ("Icon", config.default_icon.clone()),
                ],
            ),
            View::Decks => {
                let Some(category_id) = self.app.state.navigator().category_id() else {
                    return;
                };
                Form::new(
                    FormKind::NewDeck { category_id: category_id.to_string() },
                    vec![("Name", String::new()), ("Description", String::new())],
                )
            }
            View::Cards => {
                let Some(deck_id) = self.app.state.navigator().deck_id() else {
                    return;
                };
                Form::new(
                    FormKind::NewCard { deck_id: deck_id.to_string() },
                    vec![
                        ("Front", String::new()),
                        ("Back", String::new()),
                        ("Image file", String::new()),
                    ],
                )
            }
            View::Study => return,
        };
        self.form = Some(form);
        self.mode = Mode::Form;
    }

    pub fn open_edit_form(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let state = &self.app.state;
        let form = match self.view() {
            View::Categories => {
                let Some(category) = state.tree().category(&id) else {
                    return;
                };
                Form::new(
                    FormKind::EditCategory { id: category.id.clone() },
                    vec![
                        ("Name", category.name.clone()),
                        ("Color", category.color.clone()),
                        ("Icon", category.icon.clone()),
                    ],
                )
            }
            View::Decks => {
                let category = state.current_category();
                let (Some(category), Some(deck)) = (category, state.tree().deck(&id)) else {
                    return;
                };
                Form::new(
                    FormKind::EditDeck {
                        category_id: category.id.clone(),
                        deck_id: deck.id.clone(),
                    },
                    vec![("Name", deck.name.clone()), ("Description", deck.description.clone())],
                )
            }
            View::Cards => {
                let (Some(deck), Some(card)) = (state.current_deck(), state.tree().card(&id)) else {
                    return;
                };
                Form::new(
                    FormKind::EditCard {
                        deck_id: deck.id.clone(),
                        card_id: card.id.clone(),
                        image: card.image.clone(),
                    },
                    vec![
                        ("Front", card.front.clone()),
                        ("Back", card.back.clone()),
                        ("Image file (blank keeps, - removes)", String::new()),
                    ],
                )
            }
            View::Study => return,
        };
        self.form = Some(form);
        self.mode = Mode::Form;
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.mode = Mode::Browse;
    }

    /// Submit the open form. A rejected form stays open for correction.
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.take() else {
            return;
        };

        let action = match self.form_action(&form) {
            Ok(action) => action,
            Err(e) => {
                self.flash_message = Some(format!("{:#}", e));
                self.form = Some(form);
                return;
            }
        };

        if self.dispatch(action) {
            self.mode = Mode::Browse;
            let created = matches!(
                form.kind,
                FormKind::NewCategory | FormKind::NewDeck { .. } | FormKind::NewCard { .. }
            );
            if created {
                self.go_bottom();
            }
        } else {
            self.form = Some(form);
        }
    }

    fn form_action(&self, form: &Form) -> anyhow::Result<Action> {
        let action = match &form.kind {
            FormKind::NewCategory => Action::AddCategory {
                name: form.value(0),
                color: form.value(1),
                icon: form.value(2),
            },
            FormKind::EditCategory { id } => Action::UpdateCategory {
                id: id.clone(),
                name: form.value(0),
                color: form.value(1),
                icon: form.value(2),
            },
            FormKind::NewDeck { category_id } => Action::AddDeck {
                category_id: category_id.clone(),
                name: form.value(0),
                description: form.value(1),
            },
            FormKind::EditDeck { category_id, deck_id } => Action::UpdateDeck {
                category_id: category_id.clone(),
                deck_id: deck_id.clone(),
                name: form.value(0),
                description: form.value(1),
            },
            FormKind::NewCard { deck_id } => {
                let path = form.value(2);
                let image = match path.trim() {
                    "" => None,
                    path => Some(self.app.ingest_image(Path::new(path))?),
                };
                Action::AddCard {
                    deck_id: deck_id.clone(),
                    front: form.value(0),
                    back: form.value(1),
                    image,
                }
            }
            FormKind::EditCard { deck_id, card_id, image } => {
                let path = form.value(2);
                let image = match path.trim() {
                    "" => image.clone(),
                    "-" => None,
                    path => Some(self.app.ingest_image(Path::new(path))?),
                };
                Action::UpdateCard {
                    deck_id: deck_id.clone(),
                    card_id: card_id.clone(),
                    front: form.value(0),
                    back: form.value(1),
                    image,
                }
            }
        };
        Ok(action)
    }

    // ==================== Deletes ====================

    pub fn request_delete(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let navigator = self.app.state.navigator();
        let (kind, action) = match self.view() {
            View::Categories => (EntityKind::Category, Action::DeleteCategory { id: id.clone() }),
            View::Decks => {
                let Some(category_id) = navigator.category_id() else {
                    return;
                };
                (
                    EntityKind::Deck,
                    Action::DeleteDeck {
                        category_id: category_id.to_string(),
                        deck_id: id.clone(),
                    },
                )
            }
            View::Cards => {
                let Some(deck_id) = navigator.deck_id() else {
                    return;
                };
                (
                    EntityKind::Card,
                    Action::DeleteCard { deck_id: deck_id.to_string(), card_id: id.clone() },
                )
            }
            View::Study => return,
        };

        match self.app.state.tree().delete_confirmation(kind, &id) {
            Ok(message) => {
                self.pending_delete = Some(PendingDelete { message, action });
                self.mode = Mode::Confirm;
            }
            Err(e) => self.flash_message = Some(e.to_string()),
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Some(pending) = self.pending_delete.take() {
            self.dispatch(pending.action);
        }
        self.mode = Mode::Browse;
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.mode = Mode::Browse;
    }

    // ==================== Pointer ====================

    fn touch_point(&self, column: u16, row: u16) -> TouchPoint {
        TouchPoint::new(
            column as f64 * CELL_WIDTH_PX,
            row as f64 * CELL_HEIGHT_PX,
            self.started.elapsed().as_millis() as i64,
        )
    }

    pub fn pointer_down(&mut self, column: u16, row: u16) {
        let point = self.touch_point(column, row);
        self.dispatch(Action::TouchStart(point));
    }

    /// Finish a drag. Anything that is not a swipe counts as a click.
    pub fn pointer_up(&mut self, column: u16, row: u16) {
        let point = self.touch_point(column, row);
        self.dispatch(Action::TouchEnd(point));
        if self.app.state.last_gesture() == Some(Gesture::NoGesture) {
            self.click(column, row);
        }
    }

    fn click(&mut self, column: u16, row: u16) {
        if self.view() == View::Study {
            if self.card_area.is_some_and(|area| contains(area, column, row)) {
                self.dispatch(Action::Flip);
            }
            return;
        }

        let Some(area) = self.list_area else {
            return;
        };
        if !contains(area, column, row) {
            return;
        }
        // Account for the border
        let index = self.list_offset + row.saturating_sub(area.y + 1) as usize;
        if index >= self.rows().len() {
            return;
        }
        if self.selected == index {
            self.open_selected();
        } else {
            self.selected = index;
        }
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height
}
