//! Cardbox: flash cards organized as categories → decks → cards, with a
//! linear or shuffled study mode.
//!
//! The library holds all state and rules; front ends (the `cardbox-cli`
//! binary and its TUI) only dispatch actions and read state back.

pub mod app;
pub mod config;
pub mod error;
pub mod flashcards;
pub mod id;
pub mod media;
pub mod navigation;
pub mod storage;
pub mod study;

pub use app::{Action, AppState, Notice, NoticeLevel};
pub use config::Config;
pub use error::{CardboxError, EntityKind, Result};
pub use flashcards::{Card, Category, CategoryTree, Deck};
pub use navigation::{Navigator, View};
