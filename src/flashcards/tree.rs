//! CRUD over the category → deck → card tree
//!
//! The tree is the single source of truth. There are no secondary indexes:
//! every lookup is a linear scan by id, and every count is computed on
//! demand. Rejected operations leave the tree untouched.

use serde::{Deserialize, Serialize};

use super::models::{Card, Category, Deck};
use crate::error::{CardboxError, EntityKind, Result};

/// Trim a required form field, rejecting it if nothing is left
fn required(value: &str, field: &'static str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CardboxError::Validation(field));
    }
    Ok(trimmed.to_string())
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

/// The full in-memory flashcard tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTree {
    categories: Vec<Category>,
}

impl CategoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_categories(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn into_categories(self) -> Vec<Category> {
        self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn total_decks(&self) -> usize {
        self.categories.iter().map(Category::deck_count).sum()
    }

    pub fn total_cards(&self) -> usize {
        self.categories.iter().map(Category::card_count).sum()
    }

    // ==================== Lookups ====================

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    fn category_mut(&mut self, id: &str) -> Result<&mut Category> {
        self.categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| CardboxError::not_found(EntityKind::Category, id))
    }

    /// Find a deck anywhere in the tree
    pub fn deck(&self, deck_id: &str) -> Option<&Deck> {
        self.categories
            .iter()
            .flat_map(|c| c.decks.iter())
            .find(|d| d.id == deck_id)
    }

    /// Find a deck only if it belongs to the given category
    pub fn deck_in(&self, category_id: &str, deck_id: &str) -> Option<&Deck> {
        self.category(category_id)
            .and_then(|c| c.decks.iter().find(|d| d.id == deck_id))
    }

    /// The category that owns a deck
    pub fn category_of_deck(&self, deck_id: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.decks.iter().any(|d| d.id == deck_id))
    }

    fn deck_mut(&mut self, deck_id: &str) -> Result<&mut Deck> {
        self.categories
            .iter_mut()
            .flat_map(|c| c.decks.iter_mut())
            .find(|d| d.id == deck_id)
            .ok_or_else(|| CardboxError::not_found(EntityKind::Deck, deck_id))
    }

    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.categories
            .iter()
            .flat_map(|c| c.decks.iter())
            .flat_map(|d| d.cards.iter())
            .find(|card| card.id == card_id)
    }

    // ==================== Category Operations ====================

    /// Append a new category
    pub fn add_category(&mut self, name: &str, color: &str, icon: &str) -> Result<&Category> {
        let name = required(name, "Category name")?;
        self.categories
            .push(Category::new(name, color.to_string(), icon.to_string()));
        let category = &self.categories[self.categories.len() - 1];
        log::info!("Created category {}", category.id);
        Ok(category)
    }

    /// Replace a category's name, color and icon
    pub fn update_category(
        &mut self,
        id: &str,
        name: &str,
        color: &str,
        icon: &str,
    ) -> Result<()> {
        let name = required(name, "Category name")?;
        let category = self.category_mut(id)?;
        category.name = name;
        category.color = color.to_string();
        category.icon = icon.to_string();
        log::info!("Updated category {}", category.id);
        Ok(())
    }

    /// Remove a category together with all of its decks and cards
    pub fn delete_category(&mut self, id: &str) -> Result<Category> {
        let pos = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CardboxError::not_found(EntityKind::Category, id))?;
        let removed = self.categories.remove(pos);
        log::info!(
            "Deleted category {} ({} decks, {} cards)",
            removed.id,
            removed.deck_count(),
            removed.card_count()
        );
        Ok(removed)
    }

    // ==================== Deck Operations ====================

    /// Append a new deck to a category
    pub fn add_deck(
        &mut self,
        category_id: &str,
        name: &str,
        description: &str,
    ) -> Result<&Deck> {
        let name = required(name, "Deck name")?;
        let category = self.category_mut(category_id)?;
        category
            .decks
            .push(Deck::new(name, description.trim().to_string()));
        let deck = &category.decks[category.decks.len() - 1];
        log::info!("Created deck {} in category {}", deck.id, category.id);
        Ok(deck)
    }

    /// Replace a deck's name and description
    pub fn update_deck(
        &mut self,
        category_id: &str,
        deck_id: &str,
        name: &str,
        description: &str,
    ) -> Result<()> {
        let name = required(name, "Deck name")?;
        let deck = self
            .category_mut(category_id)?
            .decks
            .iter_mut()
            .find(|d| d.id == deck_id)
            .ok_or_else(|| CardboxError::not_found(EntityKind::Deck, deck_id))?;
        deck.name = name;
        deck.description = description.trim().to_string();
        log::info!("Updated deck {}", deck.id);
        Ok(())
    }

    /// Remove a deck and all of its cards
    pub fn delete_deck(&mut self, category_id: &str, deck_id: &str) -> Result<Deck> {
        let category = self.category_mut(category_id)?;
        let pos = category
            .decks
            .iter()
            .position(|d| d.id == deck_id)
            .ok_or_else(|| CardboxError::not_found(EntityKind::Deck, deck_id))?;
        let removed = category.decks.remove(pos);
        log::info!("Deleted deck {} ({} cards)", removed.id, removed.card_count());
        Ok(removed)
    }

    // ==================== Card Operations ====================

    /// Append a new card to a deck
    pub fn add_card(
        &mut self,
        deck_id: &str,
        front: &str,
        back: &str,
        image: Option<String>,
    ) -> Result<&Card> {
        let front = required(front, "Front")?;
        let back = required(back, "Back")?;
        let deck = self.deck_mut(deck_id)?;
        deck.cards.push(Card::new(front, back, image));
        let card = &deck.cards[deck.cards.len() - 1];
        log::info!("Created card {} in deck {}", card.id, deck.id);
        Ok(card)
    }

    /// Replace a card's front, back and image. `None` clears the image.
    pub fn update_card(
        &mut self,
        deck_id: &str,
        card_id: &str,
        front: &str,
        back: &str,
        image: Option<String>,
    ) -> Result<()> {
        let front = required(front, "Front")?;
        let back = required(back, "Back")?;
        let card = self
            .deck_mut(deck_id)?
            .cards
            .iter_mut()
            .find(|c| c.id == card_id)
            .ok_or_else(|| CardboxError::not_found(EntityKind::Card, card_id))?;
        card.front = front;
        card.back = back;
        card.image = image;
        log::info!("Updated card {}", card.id);
        Ok(())
    }

    pub fn delete_card(&mut self, deck_id: &str, card_id: &str) -> Result<Card> {
        let deck = self.deck_mut(deck_id)?;
        let pos = deck
            .cards
            .iter()
            .position(|c| c.id == card_id)
            .ok_or_else(|| CardboxError::not_found(EntityKind::Card, card_id))?;
        let removed = deck.cards.remove(pos);
        log::info!("Deleted card {} from deck {}", removed.id, deck.id);
        Ok(removed)
    }

    /// Message shown before deleting an entity. The delete itself does not
    /// ask; callers gate it on the user's answer.
    pub fn delete_confirmation(&self, kind: EntityKind, id: &str) -> Result<String> {
        match kind {
            EntityKind::Category => {
                let category = self
                    .category(id)
                    .ok_or_else(|| CardboxError::not_found(kind, id))?;
                Ok(format!(
                    "Delete \"{}\"? This will also delete {} and all their cards.",
                    category.name,
                    plural(category.deck_count(), "deck")
                ))
            }
            EntityKind::Deck => {
                let deck = self.deck(id).ok_or_else(|| CardboxError::not_found(kind, id))?;
                Ok(format!(
                    "Delete \"{}\"? This will also delete {}.",
                    deck.name,
                    plural(deck.card_count(), "card")
                ))
            }
            EntityKind::Card => {
                self.card(id).ok_or_else(|| CardboxError::not_found(kind, id))?;
                Ok("Delete this card?".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spanish_tree() -> (CategoryTree, String, String) {
        let mut tree = CategoryTree::new();
        let category_id = tree.add_category("Spanish", "#6366f1", "📚").unwrap().id.clone();
        let deck_id = tree.add_deck(&category_id, "Basic", "").unwrap().id.clone();
        tree.add_card(&deck_id, "Hola", "Hello", None).unwrap();
        tree.add_card(&deck_id, "Adiós", "Goodbye", None).unwrap();
        tree.add_card(&deck_id, "Gracias", "Thank you", None).unwrap();
        (tree, category_id, deck_id)
    }

    #[test]
    fn test_build_spanish_scenario() {
        let mut tree = CategoryTree::new();
        let category = tree.add_category("Spanish", "#6366f1", "📚").unwrap();
        assert!(category.decks.is_empty());
        let category_id = category.id.clone();
        assert_eq!(tree.categories().len(), 1);

        let deck_id = tree.add_deck(&category_id, "Basic", "").unwrap().id.clone();
        assert_eq!(tree.category(&category_id).unwrap().decks.len(), 1);
        assert!(tree.deck(&deck_id).unwrap().cards.is_empty());

        tree.add_card(&deck_id, "Hola", "Hello", None).unwrap();
        tree.add_card(&deck_id, "Adiós", "Goodbye", None).unwrap();
        tree.add_card(&deck_id, "Gracias", "Thank you", None).unwrap();
        assert_eq!(tree.deck(&deck_id).unwrap().cards.len(), 3);
    }

    #[test]
    fn test_whitespace_name_is_rejected() {
        let mut tree = CategoryTree::new();
        let err = tree.add_category("   ", "#6366f1", "📚").unwrap_err();
        assert!(matches!(err, CardboxError::Validation(_)));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_fields_are_trimmed() {
        let mut tree = CategoryTree::new();
        let category_id = tree.add_category("  Spanish ", "#6366f1", "📚").unwrap().id.clone();
        let deck_id = tree.add_deck(&category_id, " Basic ", "  words ").unwrap().id.clone();
        tree.add_card(&deck_id, " Hola ", "\tHello\n", None).unwrap();

        let deck = tree.deck(&deck_id).unwrap();
        assert_eq!(tree.category(&category_id).unwrap().name, "Spanish");
        assert_eq!(deck.name, "Basic");
        assert_eq!(deck.description, "words");
        assert_eq!(deck.cards[0].front, "Hola");
        assert_eq!(deck.cards[0].back, "Hello");
    }

    #[test]
    fn test_card_requires_front_and_back() {
        let (mut tree, _, deck_id) = spanish_tree();
        let before = tree.clone();

        assert!(tree.add_card(&deck_id, "", "Hello", None).is_err());
        assert!(tree.add_card(&deck_id, "Hola", "  ", None).is_err());
        assert_eq!(tree, before);
    }

    #[test]
    fn test_update_category() {
        let (mut tree, category_id, _) = spanish_tree();
        tree.update_category(&category_id, "Español", "#22c55e", "🌍").unwrap();

        let category = tree.category(&category_id).unwrap();
        assert_eq!(category.name, "Español");
        assert_eq!(category.color, "#22c55e");
        assert_eq!(category.icon, "🌍");
        assert_eq!(category.deck_count(), 1);
    }

    #[test]
    fn test_update_rejects_empty_name_and_unknown_id() {
        let (mut tree, category_id, _) = spanish_tree();
        let before = tree.clone();

        assert!(matches!(
            tree.update_category(&category_id, " ", "#000", "x"),
            Err(CardboxError::Validation(_))
        ));
        assert!(matches!(
            tree.update_category("missing", "Name", "#000", "x"),
            Err(CardboxError::NotFound { kind: EntityKind::Category, .. })
        ));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_update_deck_and_card() {
        let (mut tree, category_id, deck_id) = spanish_tree();
        tree.update_deck(&category_id, &deck_id, "Greetings", "Common phrases").unwrap();
        let card_id = tree.deck(&deck_id).unwrap().cards[0].id.clone();
        let image = Some("data:image/png;base64,AA==".to_string());
        tree.update_card(&deck_id, &card_id, "Buenos días", "Good morning", image)
            .unwrap();

        let deck = tree.deck(&deck_id).unwrap();
        assert_eq!(deck.name, "Greetings");
        assert_eq!(deck.description, "Common phrases");
        assert_eq!(deck.cards[0].front, "Buenos días");
        assert!(deck.cards[0].has_image());

        tree.update_card(&deck_id, &card_id, "Buenos días", "Good morning", None).unwrap();
        assert!(!tree.card(&card_id).unwrap().has_image());
    }

    #[test]
    fn test_update_deck_scoped_to_category() {
        let (mut tree, _, deck_id) = spanish_tree();
        let other = tree.add_category("French", "#ef4444", "🌍").unwrap().id.clone();

        let err = tree.update_deck(&other, &deck_id, "Moved", "").unwrap_err();
        assert!(matches!(err, CardboxError::NotFound { kind: EntityKind::Deck, .. }));
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let (mut tree, category_id, deck_id) = spanish_tree();
        let before = tree.clone();

        assert!(tree.delete_category("missing").is_err());
        assert!(tree.delete_deck(&category_id, "missing").is_err());
        assert!(tree.delete_card(&deck_id, "missing").is_err());
        assert_eq!(tree, before);
    }

    #[test]
    fn test_delete_category_cascades() {
        let (mut tree, spanish_id, _) = spanish_tree();
        let french_id = tree.add_category("French", "#ef4444", "🌍").unwrap().id.clone();
        let french_deck = tree.add_deck(&french_id, "Basics", "").unwrap().id.clone();
        tree.add_card(&french_deck, "Bonjour", "Hello", None).unwrap();
        let extra_deck = tree.add_deck(&spanish_id, "Verbs", "").unwrap().id.clone();
        tree.add_card(&extra_deck, "Ser", "To be", None).unwrap();

        let spanish = tree.category(&spanish_id).unwrap();
        let (decks, cards) = (spanish.deck_count(), spanish.card_count());
        let (total_decks, total_cards) = (tree.total_decks(), tree.total_cards());

        let removed = tree.delete_category(&spanish_id).unwrap();
        assert_eq!(removed.deck_count(), 2);
        assert_eq!(tree.total_decks(), total_decks - decks);
        assert_eq!(tree.total_cards(), total_cards - cards);
        assert!(tree.deck(&extra_deck).is_none());
        assert!(tree.deck(&french_deck).is_some());
    }

    #[test]
    fn test_delete_deck_cascades() {
        let (mut tree, category_id, deck_id) = spanish_tree();
        let card_id = tree.deck(&deck_id).unwrap().cards[0].id.clone();

        let removed = tree.delete_deck(&category_id, &deck_id).unwrap();
        assert_eq!(removed.card_count(), 3);
        assert!(tree.card(&card_id).is_none());
        assert_eq!(tree.total_cards(), 0);
    }

    #[test]
    fn test_delete_card() {
        let (mut tree, _, deck_id) = spanish_tree();
        let card_id = tree.deck(&deck_id).unwrap().cards[1].id.clone();

        let removed = tree.delete_card(&deck_id, &card_id).unwrap();
        assert_eq!(removed.front, "Adiós");
        let fronts: Vec<&str> = tree
            .deck(&deck_id)
            .unwrap()
            .cards
            .iter()
            .map(|c| c.front.as_str())
            .collect();
        assert_eq!(fronts, vec!["Hola", "Gracias"]);
    }

    #[test]
    fn test_delete_confirmation_messages() {
        let (tree, category_id, deck_id) = spanish_tree();
        let card_id = tree.deck(&deck_id).unwrap().cards[0].id.clone();

        assert_eq!(
            tree.delete_confirmation(EntityKind::Category, &category_id).unwrap(),
            "Delete \"Spanish\"? This will also delete 1 deck and all their cards."
        );
        assert_eq!(
            tree.delete_confirmation(EntityKind::Deck, &deck_id).unwrap(),
            "Delete \"Basic\"? This will also delete 3 cards."
        );
        assert_eq!(
            tree.delete_confirmation(EntityKind::Card, &card_id).unwrap(),
            "Delete this card?"
        );
        assert!(tree.delete_confirmation(EntityKind::Card, "missing").is_err());
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let (tree, _, _) = spanish_tree();
        let json = serde_json::to_value(&tree).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["decks"][0]["cards"].as_array().unwrap().len(), 3);
    }
}
