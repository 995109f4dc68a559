//! Linear study sessions
//!
//! A session works on a snapshot of the deck's cards taken at start; edits
//! to the deck afterwards do not reach it. The cursor is clamped at both
//! ends, and moving to another card always shows its front.

use rand::Rng;
use serde::Serialize;

use super::gesture::Gesture;
use crate::error::{CardboxError, Result};
use crate::flashcards::{Card, Deck};

/// `current` is 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

impl Progress {
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.current as f64 / self.total as f64 * 100.0
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.current, self.total)
    }
}

#[derive(Debug, Clone)]
pub struct StudySession {
    deck_id: String,
    working_set: Vec<Card>,
    cursor: usize,
    flipped: bool,
}

impl StudySession {
    /// Snapshot the deck's cards in their stored order
    pub fn start(deck: &Deck) -> Result<Self> {
        if deck.cards.is_empty() {
            return Err(CardboxError::EmptyDeck);
        }
        Ok(Self {
            deck_id: deck.id.clone(),
            working_set: deck.cards.clone(),
            cursor: 0,
            flipped: false,
        })
    }

    pub fn deck_id(&self) -> &str {
        &self.deck_id
    }

    pub fn cards(&self) -> &[Card] {
        &self.working_set
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.working_set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.working_set.is_empty()
    }

    pub fn current(&self) -> &Card {
        &self.working_set[self.cursor]
    }

    /// True when the back of the current card is showing
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn is_first(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_last(&self) -> bool {
        self.cursor + 1 >= self.working_set.len()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            current: self.cursor + 1,
            total: self.working_set.len(),
        }
    }

    /// Advance one card. Returns false at the last card.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.cursor += 1;
        self.flipped = false;
        true
    }

    /// Go back one card. Returns false at the first card.
    pub fn previous(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.cursor -= 1;
        self.flipped = false;
        true
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    /// Fisher–Yates shuffle, then back to the first card, front up
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in (1..self.working_set.len()).rev() {
            let j = rng.gen_range(0..=i);
            self.working_set.swap(i, j);
        }
        self.cursor = 0;
        self.flipped = false;
    }

    /// Swipe left/right move between cards, up/down flip. Returns whether
    /// the gesture did anything.
    pub fn handle_gesture(&mut self, gesture: Gesture) -> bool {
        match gesture {
            Gesture::SwipeLeft => self.next(),
            Gesture::SwipeRight => self.previous(),
            Gesture::SwipeUp | Gesture::SwipeDown => {
                self.flip();
                true
            }
            Gesture::NoGesture => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn deck_of(fronts: &[&str]) -> Deck {
        let mut deck = Deck::new("Basic".into(), String::new());
        for front in fronts {
            deck.cards.push(Card::new(front.to_string(), format!("{} (back)", front), None));
        }
        deck
    }

    fn spanish() -> Deck {
        deck_of(&["Hola", "Adiós", "Gracias"])
    }

    #[test]
    fn test_empty_deck() {
        let deck = deck_of(&[]);
        assert!(matches!(StudySession::start(&deck), Err(CardboxError::EmptyDeck)));
    }

    #[test]
    fn test_scenario_cursor_clamps() {
        let mut session = StudySession::start(&spanish()).unwrap();
        assert_eq!(session.len(), 3);
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.current().front, "Hola");

        assert!(session.next());
        assert!(session.next());
        assert_eq!(session.cursor(), 2);
        assert!(!session.next());
        assert_eq!(session.cursor(), 2);
        assert!(session.previous());
        assert_eq!(session.cursor(), 1);
    }

    #[test]
    fn test_previous_at_start_is_noop() {
        let mut session = StudySession::start(&spanish()).unwrap();
        assert!(!session.previous());
        assert_eq!(session.cursor(), 0);
        assert!(session.is_first());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut deck = spanish();
        let session = StudySession::start(&deck).unwrap();
        deck.cards.clear();
        assert_eq!(session.len(), 3);
        assert_eq!(session.deck_id(), deck.id);
    }

    #[test]
    fn test_flip_resets_on_navigate() {
        let mut session = StudySession::start(&spanish()).unwrap();
        session.flip();
        assert!(session.is_flipped());

        session.next();
        assert!(!session.is_flipped());

        session.flip();
        session.previous();
        assert!(!session.is_flipped());
    }

    #[test]
    fn test_clamped_move_keeps_flip() {
        let mut session = StudySession::start(&spanish()).unwrap();
        session.flip();
        session.previous();
        assert!(session.is_flipped());
    }

    #[test]
    fn test_flip_toggles() {
        let mut session = StudySession::start(&spanish()).unwrap();
        session.flip();
        session.flip();
        assert!(!session.is_flipped());
    }

    #[test]
    fn test_progress() {
        let mut session = StudySession::start(&deck_of(&["a", "b", "c", "d"])).unwrap();
        assert_eq!(session.progress(), Progress { current: 1, total: 4 });
        assert_eq!(session.progress().percentage(), 25.0);
        session.next();
        assert_eq!(session.progress().to_string(), "2 / 4");
        assert_eq!(session.progress().percentage(), 50.0);
    }

    #[test]
    fn test_first_and_last_flags() {
        let mut session = StudySession::start(&deck_of(&["only"])).unwrap();
        assert!(session.is_first());
        assert!(session.is_last());
        assert!(!session.next());

        let mut session = StudySession::start(&spanish()).unwrap();
        assert!(!session.is_last());
        session.next();
        session.next();
        assert!(session.is_last());
    }

    #[test]
    fn test_shuffle_resets_cursor_and_keeps_cards() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut session = StudySession::start(&spanish()).unwrap();
        session.next();
        session.flip();

        session.shuffle_with(&mut rng);
        assert_eq!(session.cursor(), 0);
        assert!(!session.is_flipped());

        let mut fronts: Vec<&str> = session.cards().iter().map(|c| c.front.as_str()).collect();
        fronts.sort();
        assert_eq!(fronts, vec!["Adiós", "Gracias", "Hola"]);
    }

    #[test]
    fn test_shuffle_is_uniform() {
        let mut rng = StdRng::seed_from_u64(42);
        let deck = deck_of(&["a", "b", "c"]);
        let trials = 60_000;
        let mut counts: HashMap<String, usize> = HashMap::new();

        for _ in 0..trials {
            let mut session = StudySession::start(&deck).unwrap();
            session.shuffle_with(&mut rng);
            let order: String = session.cards().iter().map(|c| c.front.as_str()).collect();
            *counts.entry(order).or_default() += 1;
        }

        // 3! permutations, each expected 10_000 times
        assert_eq!(counts.len(), 6);
        let expected = trials as f64 / 6.0;
        for (order, count) in &counts {
            let deviation = (*count as f64 - expected).abs() / expected;
            assert!(deviation < 0.05, "permutation {} seen {} times", order, count);
        }
    }

    #[test]
    fn test_gestures_drive_session() {
        let mut session = StudySession::start(&spanish()).unwrap();

        assert!(session.handle_gesture(Gesture::SwipeLeft));
        assert_eq!(session.cursor(), 1);
        assert!(session.handle_gesture(Gesture::SwipeUp));
        assert!(session.is_flipped());
        assert!(session.handle_gesture(Gesture::SwipeRight));
        assert_eq!(session.cursor(), 0);
        assert!(!session.is_flipped());
        assert!(!session.handle_gesture(Gesture::SwipeRight));
        assert!(!session.handle_gesture(Gesture::NoGesture));
    }
}
