//! View navigation
//!
//! Four views form a loop: categories → decks → cards → study, and back.
//! The navigator only tracks the current view and the two selection
//! pointers; it never renders. Pointers can go stale when the entity they
//! name is deleted, so every lookup through them returns an `Option`.

use serde::Serialize;

use crate::error::{CardboxError, EntityKind, Result};
use crate::flashcards::{Category, CategoryTree, Deck};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    Categories,
    Decks,
    Cards,
    Study,
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            View::Categories => "categories",
            View::Decks => "decks",
            View::Cards => "cards",
            View::Study => "study",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigator {
    view: View,
    category_id: Option<String>,
    deck_id: Option<String>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            view: View::Categories,
            category_id: None,
            deck_id: None,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn category_id(&self) -> Option<&str> {
        self.category_id.as_deref()
    }

    pub fn deck_id(&self) -> Option<&str> {
        self.deck_id.as_deref()
    }

    fn expect_view(&self, expected: View, action: &'static str) -> Result<()> {
        if self.view != expected {
            return Err(CardboxError::InvalidTransition {
                from: self.view,
                action,
            });
        }
        Ok(())
    }

    /// Categories → Decks
    pub fn select_category(&mut self, tree: &CategoryTree, category_id: &str) -> Result<()> {
        self.expect_view(View::Categories, "select a category")?;
        if tree.category(category_id).is_none() {
            return Err(CardboxError::not_found(EntityKind::Category, category_id));
        }
        self.category_id = Some(category_id.to_string());
        self.view = View::Decks;
        log::debug!("Navigated to decks of {}", category_id);
        Ok(())
    }

    /// Decks → Cards
    pub fn select_deck(&mut self, tree: &CategoryTree, deck_id: &str) -> Result<()> {
        self.expect_view(View::Decks, "select a deck")?;
        let in_category = self
            .current_category(tree)
            .is_some_and(|c| c.decks.iter().any(|d| d.id == deck_id));
        if !in_category {
            return Err(CardboxError::not_found(EntityKind::Deck, deck_id));
        }
        self.deck_id = Some(deck_id.to_string());
        self.view = View::Cards;
        log::debug!("Navigated to cards of {}", deck_id);
        Ok(())
    }

    /// Cards → Study. Refused when the selected deck has no cards; the view
    /// stays on Cards. Returns the deck to study.
    pub fn enter_study<'t>(&mut self, tree: &'t CategoryTree) -> Result<&'t Deck> {
        self.expect_view(View::Cards, "start studying")?;
        let deck = self.current_deck(tree).ok_or_else(|| {
            CardboxError::not_found(EntityKind::Deck, self.deck_id.as_deref().unwrap_or_default())
        })?;
        if deck.cards.is_empty() {
            return Err(CardboxError::EmptyDeck);
        }
        self.view = View::Study;
        log::debug!("Entered study for {}", deck.id);
        Ok(deck)
    }

    /// Step back one level and return the new view
    pub fn back(&mut self) -> View {
        self.view = match self.view {
            View::Categories => View::Categories,
            View::Decks => {
                self.category_id = None;
                View::Categories
            }
            View::Cards => {
                self.deck_id = None;
                View::Decks
            }
            View::Study => View::Cards,
        };
        self.view
    }

    pub fn can_go_back(&self) -> bool {
        self.view != View::Categories
    }

    pub fn current_category<'t>(&self, tree: &'t CategoryTree) -> Option<&'t Category> {
        self.category_id.as_deref().and_then(|id| tree.category(id))
    }

    pub fn current_deck<'t>(&self, tree: &'t CategoryTree) -> Option<&'t Deck> {
        let category_id = self.category_id.as_deref()?;
        let deck_id = self.deck_id.as_deref()?;
        tree.deck_in(category_id, deck_id)
    }

    /// Fall back to the nearest view whose pointers still resolve. Returns
    /// true if the view changed.
    pub fn reconcile(&mut self, tree: &CategoryTree) -> bool {
        let before = self.view;

        if matches!(self.view, View::Decks | View::Cards | View::Study)
            && self.current_category(tree).is_none()
        {
            self.category_id = None;
            self.deck_id = None;
            self.view = View::Categories;
        } else if matches!(self.view, View::Cards | View::Study)
            && self.current_deck(tree).is_none()
        {
            self.deck_id = None;
            self.view = View::Decks;
        }

        if self.view != before {
            log::debug!("Selection went stale, fell back from {} to {}", before, self.view);
        }
        self.view != before
    }

    /// Header text for the current view
    pub fn title(&self, tree: &CategoryTree) -> String {
        match self.view {
            View::Categories => "Flash Cards".to_string(),
            View::Decks => self
                .current_category(tree)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "Decks".to_string()),
            View::Cards => self
                .current_deck(tree)
                .map(|d| d.name.clone())
                .unwrap_or_else(|| "Cards".to_string()),
            View::Study => "Study Mode".to_string(),
        }
    }
}
