//! Data models for the flashcard tree

use serde::{Deserialize, Serialize};

use crate::id::generate_id;

/// Default category color offered by the category form
pub const DEFAULT_COLOR: &str = "#6366f1";

/// Default category icon offered by the category form
pub const DEFAULT_ICON: &str = "📚";

/// Colors offered by the category color picker
pub const COLOR_PALETTE: [&str; 10] = [
    "#6366f1", "#8b5cf6", "#ec4899", "#ef4444", "#f97316", "#eab308", "#22c55e", "#14b8a6",
    "#06b6d4", "#3b82f6",
];

/// Icons offered by the category icon picker
pub const ICON_SET: [&str; 10] = [
    "📚", "🌍", "🔬", "🎨", "💻", "🎵", "🏃", "🍳", "💼", "🧠",
];

/// A top-level grouping of decks, with a display color and icon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default)]
    pub decks: Vec<Deck>,
}

/// Parse a `#rrggbb` color into its channels
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

impl Category {
    pub fn new(name: String, color: String, icon: String) -> Self {
        Self {
            id: generate_id(),
            name,
            color,
            icon,
            decks: Vec::new(),
        }
    }

    pub fn deck_count(&self) -> usize {
        self.decks.len()
    }

    /// Total cards across all decks in this category
    pub fn card_count(&self) -> usize {
        self.decks.iter().map(Deck::card_count).sum()
    }
}

/// A named collection of cards within a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Deck {
    pub fn new(name: String, description: String) -> Self {
        Self {
            id: generate_id(),
            name,
            description,
            cards: Vec::new(),
        }
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }
}

/// A front/back study unit with an optional image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub front: String,
    pub back: String,
    /// Opaque encoded image (a data URL), never inspected by the core
    #[serde(default)]
    pub image: Option<String>,
}

impl Card {
    pub fn new(front: String, back: String, image: Option<String>) -> Self {
        Self {
            id: generate_id(),
            front,
            back,
            image,
        }
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}
