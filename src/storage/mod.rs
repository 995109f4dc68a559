mod deck_store;
mod kv;

pub use deck_store::{DeckStore, DEFAULT_STORAGE_KEY};
pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
