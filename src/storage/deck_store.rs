//! Whole-tree persistence for the flashcard tree
//!
//! The entire category list is serialized to JSON and written under a single
//! key on every mutation. There is no incremental write path, so save cost
//! grows with the size of the tree (including inline images). That is fine
//! for a personal collection but is the first thing to revisit if trees get
//! large.

use super::kv::KeyValueStore;
use crate::error::{CardboxError, Result};
use crate::flashcards::{Category, CategoryTree};

/// Key the tree has always been stored under
pub const DEFAULT_STORAGE_KEY: &str = "flashCardsData";

pub struct DeckStore<S: KeyValueStore> {
    kv: S,
    key: String,
}

impl<S: KeyValueStore> DeckStore<S> {
    pub fn new(kv: S) -> Self {
        Self::with_key(kv, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(kv: S, key: &str) -> Self {
        Self {
            kv,
            key: key.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Serialize and write the whole tree
    pub fn save(&mut self, tree: &CategoryTree) -> Result<()> {
        let content = serde_json::to_string(tree)?;
        self.kv.set(&self.key, &content)?;
        log::debug!("Saved {} categories ({} bytes)", tree.categories().len(), content.len());
        Ok(())
    }

    /// Read the tree. A missing key is an empty tree; unparseable content is
    /// `CorruptedState`.
    pub fn load(&self) -> Result<CategoryTree> {
        let Some(content) = self.kv.get(&self.key)? else {
            return Ok(CategoryTree::new());
        };
        let categories: Vec<Category> =
            serde_json::from_str(&content).map_err(CardboxError::CorruptedState)?;
        Ok(CategoryTree::from_categories(categories))
    }

    /// Load, treating corrupted content as "no data". IO failures still
    /// propagate.
    pub fn load_or_empty(&self) -> Result<CategoryTree> {
        match self.load() {
            Err(CardboxError::CorruptedState(e)) => {
                log::warn!("Ignoring corrupted data under {:?}: {}", self.key, e);
                Ok(CategoryTree::new())
            }
            other => other,
        }
    }

    /// Drop all stored data
    pub fn clear(&mut self) -> Result<()> {
        self.kv.remove(&self.key)
    }
}
