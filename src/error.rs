use thiserror::Error;

use crate::navigation::View;

/// The kind of entity an id refers to, used in `NotFound` errors and
/// delete confirmations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Category,
    Deck,
    Card,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Category => "Category",
            EntityKind::Deck => "Deck",
            EntityKind::Card => "Card",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum CardboxError {
    #[error("{0} is required")]
    Validation(&'static str),

    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("No cards to study")]
    EmptyDeck,

    #[error("Stored data is corrupted: {0}")]
    CorruptedState(#[source] serde_json::Error),

    #[error("Please select an image file (got {0})")]
    UnsupportedMedia(String),

    #[error("Image is too large ({size} bytes, limit {limit})")]
    ImageTooLarge { size: u64, limit: u64 },

    #[error("Cannot {action} from the {from} view")]
    InvalidTransition { from: View, action: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

impl CardboxError {
    pub(crate) fn not_found(kind: EntityKind, id: &str) -> Self {
        CardboxError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CardboxError>;
