use std::path::Path;

use anyhow::{bail, Context, Result};

use cardbox_lib::flashcards::{Card, Category, Deck};
use cardbox_lib::media;
use cardbox_lib::storage::{DeckStore, FileKeyValueStore};
use cardbox_lib::{Action, AppState, Config};

/// Shared application state for CLI commands
pub struct App {
    pub config: Config,
    pub state: AppState<FileKeyValueStore>,
}

impl App {
    /// Load config and the stored tree from the data directory
    pub fn new(data_dir: Option<&Path>) -> Result<Self> {
        let config = Config::load(data_dir).context("Failed to load config")?;

        let kv = FileKeyValueStore::new(config.data_dir.clone());
        kv.init().context("Failed to initialize data directory")?;
        log::info!("Using data directory {:?}", kv.base_path());

        let store = DeckStore::with_key(kv, &config.storage_key);
        let state = AppState::load(store).context("Failed to load flash cards")?;

        Ok(Self { config, state })
    }

    /// Apply an action, turning a rejection into an error
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        self.state.dispatch(action)?;
        Ok(())
    }

    /// Find a category by name (case-insensitive prefix match)
    pub fn find_category(&self, name: &str) -> Result<Category> {
        let categories = self.state.tree().categories();
        let name_lower = name.to_lowercase();

        // Exact match first
        if let Some(c) = categories
            .iter()
            .find(|c| c.name.to_lowercase() == name_lower || c.id == name)
        {
            return Ok(c.clone());
        }

        // Prefix match
        let matches: Vec<&Category> = categories.iter()
            .filter(|c| c.name.to_lowercase().starts_with(&name_lower))
            .collect();

        match matches.len() {
            0 => bail!(
                "No category matching '{}'. Available categories:\n{}",
                name,
                bullet_list(categories.iter().map(|c| c.name.as_str()))
            ),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous category name '{}'. Matches:\n{}",
                name,
                bullet_list(matches.iter().map(|c| c.name.as_str()))
            ),
        }
    }

    /// Find a deck by name within a category (case-insensitive prefix match)
    pub fn find_deck(&self, category: &Category, name: &str) -> Result<Deck> {
        let name_lower = name.to_lowercase();

        if let Some(d) = category
            .decks
            .iter()
            .find(|d| d.name.to_lowercase() == name_lower || d.id == name)
        {
            return Ok(d.clone());
        }

        let matches: Vec<&Deck> = category.decks.iter()
            .filter(|d| d.name.to_lowercase().starts_with(&name_lower))
            .collect();

        match matches.len() {
            0 => bail!("No deck matching '{}' in category \"{}\"", name, category.name),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous deck name '{}'. Matches:\n{}",
                name,
                bullet_list(matches.iter().map(|d| d.name.as_str()))
            ),
        }
    }

    /// Find a card by id or by its 1-based position in the deck
    pub fn find_card(deck: &Deck, key: &str) -> Result<Card> {
        if let Some(card) = deck.cards.iter().find(|c| c.id == key) {
            return Ok(card.clone());
        }

        match key.parse::<usize>() {
            Ok(n) if n >= 1 && n <= deck.cards.len() => Ok(deck.cards[n - 1].clone()),
            Ok(n) => bail!("Deck \"{}\" has {} cards, no card #{}", deck.name, deck.cards.len(), n),
            Err(_) => bail!("No card '{}' in deck \"{}\"", key, deck.name),
        }
    }

    /// Read an image file into the value stored on a card
    pub fn ingest_image(&self, path: &Path) -> Result<String> {
        media::ingest_image_file(path, self.config.max_image_bytes)
            .with_context(|| format!("Failed to attach image {}", path.display()))
    }

    /// Walk the navigator down to a deck's card list
    pub fn open_deck(&mut self, category: &Category, deck: &Deck) -> Result<()> {
        self.dispatch(Action::SelectCategory(category.id.clone()))?;
        self.dispatch(Action::SelectDeck(deck.id.clone()))?;
        Ok(())
    }
}

fn bullet_list<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.map(|n| format!("  - {}", n)).collect::<Vec<_>>().join("\n")
}
