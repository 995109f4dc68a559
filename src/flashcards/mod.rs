//! Flashcard tree for Cardbox
//!
//! This module provides:
//! - Category, deck and card models
//! - Tree CRUD with cascading deletes
//! - On-demand counts

pub mod models;
pub mod tree;

pub use models::*;
pub use tree::CategoryTree;
