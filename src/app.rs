//! Application state and its update function
//!
//! `AppState` owns everything a front end needs: the tree, the navigator,
//! the active study session and the last notice. All changes go through
//! `dispatch`, one action at a time. A tree mutation that succeeds is
//! persisted immediately; a failed save keeps the in-memory change and
//! reports the failure as a notice.

use serde::Serialize;

use crate::error::{CardboxError, Result};
use crate::flashcards::{Category, CategoryTree, Deck};
use crate::navigation::{Navigator, View};
use crate::storage::{DeckStore, KeyValueStore};
use crate::study::{Gesture, StudySession, SwipeTracker, TouchPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient, user-visible message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddCategory { name: String, color: String, icon: String },
    UpdateCategory { id: String, name: String, color: String, icon: String },
    DeleteCategory { id: String },
    AddDeck { category_id: String, name: String, description: String },
    UpdateDeck { category_id: String, deck_id: String, name: String, description: String },
    DeleteDeck { category_id: String, deck_id: String },
    AddCard {
        deck_id: String,
        front: String,
        back: String,
        image: Option<String>,
    },
    UpdateCard {
        deck_id: String,
        card_id: String,
        front: String,
        back: String,
        image: Option<String>,
    },
    DeleteCard { deck_id: String, card_id: String },
    SelectCategory(String),
    SelectDeck(String),
    EnterStudy,
    Back,
    NextCard,
    PreviousCard,
    Flip,
    Shuffle,
    TouchStart(TouchPoint),
    TouchEnd(TouchPoint),
    Swipe(Gesture),
}

impl Action {
    fn mutates_tree(&self) -> bool {
        matches!(
            self,
            Action::AddCategory { .. }
                | Action::UpdateCategory { .. }
                | Action::DeleteCategory { .. }
                | Action::AddDeck { .. }
                | Action::UpdateDeck { .. }
                | Action::DeleteDeck { .. }
                | Action::AddCard { .. }
                | Action::UpdateCard { .. }
                | Action::DeleteCard { .. }
        )
    }
}

pub struct AppState<S: KeyValueStore> {
    tree: CategoryTree,
    navigator: Navigator,
    session: Option<StudySession>,
    swipe: SwipeTracker,
    last_gesture: Option<Gesture>,
    notice: Option<Notice>,
    store: DeckStore<S>,
}

impl<S: KeyValueStore> AppState<S> {
    /// Load the tree from the store. Corrupted data starts an empty tree.
    pub fn load(store: DeckStore<S>) -> Result<Self> {
        let tree = store.load_or_empty()?;
        log::info!(
            "Loaded {} categories, {} decks, {} cards",
            tree.categories().len(),
            tree.total_decks(),
            tree.total_cards()
        );
        Ok(Self::with_tree(store, tree))
    }

    pub fn with_tree(store: DeckStore<S>, tree: CategoryTree) -> Self {
        Self {
            tree,
            navigator: Navigator::new(),
            session: None,
            swipe: SwipeTracker::new(),
            last_gesture: None,
            notice: None,
            store,
        }
    }

    // ==================== Queries ====================

    pub fn tree(&self) -> &CategoryTree {
        &self.tree
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn view(&self) -> View {
        self.navigator.view()
    }

    pub fn session(&self) -> Option<&StudySession> {
        self.session.as_ref()
    }

    pub fn current_category(&self) -> Option<&Category> {
        self.navigator.current_category(&self.tree)
    }

    pub fn current_deck(&self) -> Option<&Deck> {
        self.navigator.current_deck(&self.tree)
    }

    pub fn title(&self) -> String {
        self.navigator.title(&self.tree)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// The gesture recognized by the most recent `TouchEnd`
    pub fn last_gesture(&self) -> Option<Gesture> {
        self.last_gesture
    }

    pub fn store(&self) -> &DeckStore<S> {
        &self.store
    }

    // ==================== Updates ====================

    /// Apply one action. Failures leave state untouched (except for a
    /// failed save, which keeps the change) and raise an error notice.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        let persist = action.mutates_tree();
        let outcome = self.apply(action);

        let outcome = match outcome {
            Ok(message) if persist => match self.store.save(&self.tree) {
                Ok(()) => Ok(message),
                Err(e) => {
                    log::warn!("Change kept in memory but not saved: {}", e);
                    self.notice = Some(Notice::error(format!("Could not save changes: {}", e)));
                    return Err(e);
                }
            },
            other => other,
        };

        match outcome {
            Ok(Some(message)) => {
                self.notice = Some(Notice::success(message));
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => {
                log::debug!("Action rejected: {}", e);
                self.notice = Some(Notice::error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Returns the success notice to show, if any
    fn apply(&mut self, action: Action) -> Result<Option<&'static str>> {
        match action {
            Action::AddCategory { name, color, icon } => {
                self.tree.add_category(&name, &color, &icon)?;
                Ok(Some("Category created!"))
            }
            Action::UpdateCategory { id, name, color, icon } => {
                self.tree.update_category(&id, &name, &color, &icon)?;
                Ok(Some("Category updated!"))
            }
            Action::DeleteCategory { id } => {
                self.tree.delete_category(&id)?;
                self.after_delete();
                Ok(Some("Category deleted"))
            }
            Action::AddDeck { category_id, name, description } => {
                self.tree.add_deck(&category_id, &name, &description)?;
                Ok(Some("Deck created!"))
            }
            Action::UpdateDeck { category_id, deck_id, name, description } => {
                self.tree.update_deck(&category_id, &deck_id, &name, &description)?;
                Ok(Some("Deck updated!"))
            }
            Action::DeleteDeck { category_id, deck_id } => {
                self.tree.delete_deck(&category_id, &deck_id)?;
                self.after_delete();
                Ok(Some("Deck deleted"))
            }
            Action::AddCard { deck_id, front, back, image } => {
                self.tree.add_card(&deck_id, &front, &back, image)?;
                Ok(Some("Card created!"))
            }
            Action::UpdateCard { deck_id, card_id, front, back, image } => {
                self.tree.update_card(&deck_id, &card_id, &front, &back, image)?;
                Ok(Some("Card updated!"))
            }
            Action::DeleteCard { deck_id, card_id } => {
                self.tree.delete_card(&deck_id, &card_id)?;
                self.after_delete();
                Ok(Some("Card deleted"))
            }
            Action::SelectCategory(id) => {
                self.navigator.select_category(&self.tree, &id)?;
                Ok(None)
            }
            Action::SelectDeck(id) => {
                self.navigator.select_deck(&self.tree, &id)?;
                Ok(None)
            }
            Action::EnterStudy => {
                let deck = self.navigator.enter_study(&self.tree)?;
                self.session = Some(StudySession::start(deck)?);
                Ok(None)
            }
            Action::Back => {
                if self.navigator.back() != View::Study {
                    self.session = None;
                }
                Ok(None)
            }
            Action::NextCard => {
                self.study_mut()?.next();
                Ok(None)
            }
            Action::PreviousCard => {
                self.study_mut()?.previous();
                Ok(None)
            }
            Action::Flip => {
                self.study_mut()?.flip();
                Ok(None)
            }
            Action::Shuffle => {
                self.study_mut()?.shuffle();
                Ok(Some("Cards shuffled!"))
            }
            Action::TouchStart(point) => {
                self.swipe.begin(point);
                Ok(None)
            }
            Action::TouchEnd(point) => {
                let gesture = self.swipe.end(point);
                self.last_gesture = Some(gesture);
                self.apply(Action::Swipe(gesture))
            }
            Action::Swipe(gesture) => {
                self.apply_gesture(gesture);
                Ok(None)
            }
        }
    }

    fn study_mut(&mut self) -> Result<&mut StudySession> {
        let view = self.navigator.view();
        match self.session.as_mut() {
            Some(session) if view == View::Study => Ok(session),
            _ => Err(CardboxError::InvalidTransition {
                from: view,
                action: "use study controls",
            }),
        }
    }

    /// Study view: left/right move, up/down flip. List views: swipe right
    /// goes back.
    fn apply_gesture(&mut self, gesture: Gesture) {
        match self.navigator.view() {
            View::Study => {
                if let Some(session) = self.session.as_mut() {
                    session.handle_gesture(gesture);
                }
            }
            View::Decks | View::Cards if gesture == Gesture::SwipeRight => {
                self.navigator.back();
            }
            _ => {}
        }
    }

    /// Drop pointers and the session if what they referenced is gone
    fn after_delete(&mut self) {
        self.navigator.reconcile(&self.tree);
        if self.navigator.view() != View::Study {
            self.session = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(CardboxError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full")))
        }

        fn remove(&mut self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    fn new_state() -> AppState<MemoryKeyValueStore> {
        AppState::load(DeckStore::new(MemoryKeyValueStore::new())).unwrap()
    }

    fn add_category(state: &mut AppState<MemoryKeyValueStore>, name: &str) -> String {
        state
            .dispatch(Action::AddCategory {
                name: name.into(),
                color: "#6366f1".into(),
                icon: "📚".into(),
            })
            .unwrap();
        state.tree().categories().last().unwrap().id.clone()
    }

    fn add_deck(
        state: &mut AppState<MemoryKeyValueStore>,
        category_id: &str,
        name: &str,
    ) -> String {
        state
            .dispatch(Action::AddDeck {
                category_id: category_id.into(),
                name: name.into(),
                description: String::new(),
            })
            .unwrap();
        state.tree().category(category_id).unwrap().decks.last().unwrap().id.clone()
    }

    fn add_card(state: &mut AppState<MemoryKeyValueStore>, deck_id: &str, front: &str, back: &str) {
        state
            .dispatch(Action::AddCard {
                deck_id: deck_id.into(),
                front: front.into(),
                back: back.into(),
                image: None,
            })
            .unwrap();
    }

    /// Spanish → Basic with three cards, navigated to the Cards view
    fn spanish_state() -> (AppState<MemoryKeyValueStore>, String, String) {
        let mut state = new_state();
        let category_id = add_category(&mut state, "Spanish");
        let deck_id = add_deck(&mut state, &category_id, "Basic");
        add_card(&mut state, &deck_id, "Hola", "Hello");
        add_card(&mut state, &deck_id, "Adiós", "Goodbye");
        add_card(&mut state, &deck_id, "Gracias", "Thank you");
        state.dispatch(Action::SelectCategory(category_id.clone())).unwrap();
        state.dispatch(Action::SelectDeck(deck_id.clone())).unwrap();
        (state, category_id, deck_id)
    }

    fn writes(state: &AppState<MemoryKeyValueStore>) -> usize {
        state.store().kv().write_count()
    }

    #[test]
    fn test_mutations_persist() {
        let (state, _, _) = spanish_state();
        // 1 category + 1 deck + 3 cards
        assert_eq!(writes(&state), 5);

        let reloaded = state.store().load().unwrap();
        assert_eq!(&reloaded, state.tree());
    }

    #[test]
    fn test_whitespace_category_is_noop() {
        let mut state = new_state();
        let result = state.dispatch(Action::AddCategory {
            name: "   ".into(),
            color: "#6366f1".into(),
            icon: "📚".into(),
        });

        assert!(matches!(result, Err(CardboxError::Validation(_))));
        assert!(state.tree().is_empty());
        assert_eq!(writes(&state), 0);
        assert_eq!(state.notice().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn test_delete_missing_does_not_persist() {
        let (mut state, _, _) = spanish_state();
        let before = state.tree().clone();
        let writes_before = writes(&state);

        assert!(state.dispatch(Action::DeleteCategory { id: "missing".into() }).is_err());
        assert_eq!(state.tree(), &before);
        assert_eq!(writes(&state), writes_before);
    }

    #[test]
    fn test_updates_and_deletes_persist() {
        let (mut state, category_id, deck_id) = spanish_state();
        let card_id = state.tree().deck(&deck_id).unwrap().cards[0].id.clone();
        assert_eq!(writes(&state), 5);

        state
            .dispatch(Action::UpdateCategory {
                id: category_id.clone(),
                name: "Español".into(),
                color: "#ef4444".into(),
                icon: "🌍".into(),
            })
            .unwrap();
        assert_eq!(writes(&state), 6);

        state
            .dispatch(Action::UpdateDeck {
                category_id: category_id.clone(),
                deck_id: deck_id.clone(),
                name: "Greetings".into(),
                description: "Common phrases".into(),
            })
            .unwrap();
        assert_eq!(writes(&state), 7);

        state
            .dispatch(Action::UpdateCard {
                deck_id: deck_id.clone(),
                card_id: card_id.clone(),
                front: "Buenos días".into(),
                back: "Good morning".into(),
                image: None,
            })
            .unwrap();
        assert_eq!(writes(&state), 8);
        assert_eq!(&state.store().load().unwrap(), state.tree());

        // Rejected deletes leave both the tree and the store alone
        let before = state.tree().clone();
        assert!(state
            .dispatch(Action::DeleteDeck {
                category_id: category_id.clone(),
                deck_id: "missing".into(),
            })
            .is_err());
        assert!(state
            .dispatch(Action::DeleteCard {
                deck_id: deck_id.clone(),
                card_id: "missing".into(),
            })
            .is_err());
        assert_eq!(state.tree(), &before);
        assert_eq!(writes(&state), 8);

        state
            .dispatch(Action::DeleteCard { deck_id: deck_id.clone(), card_id })
            .unwrap();
        assert_eq!(writes(&state), 9);
        assert_eq!(state.store().load().unwrap().total_cards(), 2);

        state
            .dispatch(Action::DeleteDeck { category_id: category_id.clone(), deck_id })
            .unwrap();
        assert_eq!(writes(&state), 10);

        state.dispatch(Action::DeleteCategory { id: category_id }).unwrap();
        assert_eq!(writes(&state), 11);

        let reloaded = state.store().load().unwrap();
        assert!(reloaded.is_empty());
        assert_eq!(&reloaded, state.tree());
    }

    #[test]
    fn test_success_notice() {
        let mut state = new_state();
        add_category(&mut state, "Spanish");
        assert_eq!(state.take_notice(), Some(Notice::success("Category created!")));
        assert_eq!(state.notice(), None);
    }

    #[test]
    fn test_study_scenario() {
        let (mut state, _, _) = spanish_state();
        state.dispatch(Action::EnterStudy).unwrap();
        assert_eq!(state.view(), View::Study);

        let session = state.session().unwrap();
        assert_eq!(session.len(), 3);
        assert_eq!(session.cursor(), 0);

        state.dispatch(Action::NextCard).unwrap();
        state.dispatch(Action::NextCard).unwrap();
        assert_eq!(state.session().unwrap().cursor(), 2);
        state.dispatch(Action::NextCard).unwrap();
        assert_eq!(state.session().unwrap().cursor(), 2);
        state.dispatch(Action::PreviousCard).unwrap();
        assert_eq!(state.session().unwrap().cursor(), 1);
    }

    #[test]
    fn test_flip_then_next_shows_front() {
        let (mut state, _, _) = spanish_state();
        state.dispatch(Action::EnterStudy).unwrap();
        state.dispatch(Action::Flip).unwrap();
        assert!(state.session().unwrap().is_flipped());

        state.dispatch(Action::NextCard).unwrap();
        assert!(!state.session().unwrap().is_flipped());
    }

    #[test]
    fn test_empty_deck_stays_on_cards() {
        let mut state = new_state();
        let category_id = add_category(&mut state, "Spanish");
        let deck_id = add_deck(&mut state, &category_id, "Empty");
        state.dispatch(Action::SelectCategory(category_id)).unwrap();
        state.dispatch(Action::SelectDeck(deck_id)).unwrap();

        assert!(matches!(state.dispatch(Action::EnterStudy), Err(CardboxError::EmptyDeck)));
        assert_eq!(state.view(), View::Cards);
        assert!(state.session().is_none());
        assert_eq!(state.notice(), Some(&Notice::error("No cards to study")));
    }

    #[test]
    fn test_study_controls_outside_study() {
        let (mut state, _, _) = spanish_state();
        assert!(state.dispatch(Action::Flip).is_err());
        assert!(state.dispatch(Action::Shuffle).is_err());
    }

    #[test]
    fn test_back_from_study_keeps_deck_and_drops_session() {
        let (mut state, _, deck_id) = spanish_state();
        state.dispatch(Action::EnterStudy).unwrap();
        state.dispatch(Action::Back).unwrap();

        assert_eq!(state.view(), View::Cards);
        assert_eq!(state.navigator().deck_id(), Some(deck_id.as_str()));
        assert!(state.session().is_none());
    }

    #[test]
    fn test_shuffle_notice() {
        let (mut state, _, _) = spanish_state();
        state.dispatch(Action::EnterStudy).unwrap();
        state.dispatch(Action::NextCard).unwrap();
        state.dispatch(Action::Shuffle).unwrap();

        assert_eq!(state.session().unwrap().cursor(), 0);
        assert_eq!(state.notice(), Some(&Notice::success("Cards shuffled!")));
    }

    #[test]
    fn test_delete_selected_category_falls_back() {
        let (mut state, category_id, _) = spanish_state();
        state.dispatch(Action::EnterStudy).unwrap();

        state.dispatch(Action::DeleteCategory { id: category_id }).unwrap();
        assert_eq!(state.view(), View::Categories);
        assert!(state.session().is_none());
        assert!(state.current_category().is_none());
    }

    #[test]
    fn test_delete_selected_deck_falls_back() {
        let (mut state, category_id, deck_id) = spanish_state();
        state.dispatch(Action::DeleteDeck { category_id, deck_id }).unwrap();

        assert_eq!(state.view(), View::Decks);
        assert_eq!(state.title(), "Spanish");
    }

    #[test]
    fn test_delete_card_while_studying_keeps_snapshot() {
        let (mut state, _, deck_id) = spanish_state();
        state.dispatch(Action::EnterStudy).unwrap();
        let card_id = state.current_deck().unwrap().cards[0].id.clone();

        state.dispatch(Action::DeleteCard { deck_id, card_id }).unwrap();
        assert_eq!(state.view(), View::Study);
        assert_eq!(state.session().unwrap().len(), 3);
        assert_eq!(state.current_deck().unwrap().card_count(), 2);
    }

    #[test]
    fn test_touch_swipes_in_study() {
        let (mut state, _, _) = spanish_state();
        state.dispatch(Action::EnterStudy).unwrap();

        state.dispatch(Action::TouchStart(TouchPoint::new(300.0, 200.0, 0))).unwrap();
        state.dispatch(Action::TouchEnd(TouchPoint::new(150.0, 210.0, 200))).unwrap();
        assert_eq!(state.last_gesture(), Some(Gesture::SwipeLeft));
        assert_eq!(state.session().unwrap().cursor(), 1);

        state.dispatch(Action::TouchStart(TouchPoint::new(300.0, 200.0, 1_000))).unwrap();
        state.dispatch(Action::TouchEnd(TouchPoint::new(310.0, 210.0, 1_600))).unwrap();
        assert_eq!(state.last_gesture(), Some(Gesture::NoGesture));
        assert_eq!(state.session().unwrap().cursor(), 1);
    }

    #[test]
    fn test_swipe_right_goes_back_in_lists() {
        let (mut state, _, _) = spanish_state();
        state.dispatch(Action::Swipe(Gesture::SwipeRight)).unwrap();
        assert_eq!(state.view(), View::Decks);
        state.dispatch(Action::Swipe(Gesture::SwipeLeft)).unwrap();
        assert_eq!(state.view(), View::Decks);
        state.dispatch(Action::Swipe(Gesture::SwipeRight)).unwrap();
        assert_eq!(state.view(), View::Categories);
        state.dispatch(Action::Swipe(Gesture::SwipeRight)).unwrap();
        assert_eq!(state.view(), View::Categories);
    }

    #[test]
    fn test_failed_save_keeps_change() {
        let mut state = AppState::load(DeckStore::new(FailingStore)).unwrap();
        let result = state.dispatch(Action::AddCategory {
            name: "Spanish".into(),
            color: "#6366f1".into(),
            icon: "📚".into(),
        });

        assert!(matches!(result, Err(CardboxError::Io(_))));
        assert_eq!(state.tree().categories().len(), 1);
        assert_eq!(state.notice().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn test_load_corrupted_starts_empty() {
        let mut kv = MemoryKeyValueStore::new();
        kv.set(crate::storage::DEFAULT_STORAGE_KEY, "not json").unwrap();
        let state = AppState::load(DeckStore::new(kv)).unwrap();
        assert!(state.tree().is_empty());
        assert_eq!(state.view(), View::Categories);
    }
}
