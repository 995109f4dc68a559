//! Runtime configuration
//!
//! Read from `config.toml` in the data directory. Every field has a default,
//! so a missing file or a partial one is fine.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CardboxError, Result};
use crate::flashcards::{DEFAULT_COLOR, DEFAULT_ICON};
use crate::storage::DEFAULT_STORAGE_KEY;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Config {
    /// Where the tree (and this file) live
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub default_color: String,
    pub default_icon: String,
    /// Largest image accepted for a card, in bytes
    pub max_image_bytes: u64,
    /// How long the TUI keeps a notice on screen
    pub notice_ttl_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().unwrap_or_else(|_| PathBuf::from(".cardbox")),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_color: DEFAULT_COLOR.to_string(),
            default_icon: DEFAULT_ICON.to_string(),
            max_image_bytes: 5 * 1024 * 1024,
            notice_ttl_ms: 3000,
        }
    }
}

/// Get the default data directory
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_local_dir()
        .map(|p| p.join("cardbox"))
        .ok_or(CardboxError::DataDirNotFound)
}

impl Config {
    /// Load `config.toml` from `data_dir` (or the default data directory).
    /// An explicit `data_dir` wins over the one written in the file.
    pub fn load(data_dir: Option<&Path>) -> Result<Self> {
        let dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => default_data_dir()?,
        };

        let path = dir.join(CONFIG_FILE);
        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)?;
            Self::from_toml(&content)?
        } else {
            log::debug!("No config at {:?}, using defaults", path);
            Self::default()
        };

        if data_dir.is_some() || !path.exists() {
            config.data_dir = dir;
        }
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(Some(temp.path())).unwrap();

        assert_eq!(config.data_dir, temp.path());
        assert_eq!(config.storage_key, "flashCardsData");
        assert_eq!(config.default_color, "#6366f1");
        assert_eq!(config.notice_ttl_ms, 3000);
    }

    #[test]
    fn test_partial_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "default_icon = \"🧠\"\nmax_image_bytes = 1024\n",
        )
        .unwrap();

        let config = Config::load(Some(temp.path())).unwrap();
        assert_eq!(config.default_icon, "🧠");
        assert_eq!(config.max_image_bytes, 1024);
        assert_eq!(config.storage_key, "flashCardsData");
        assert_eq!(config.data_dir, temp.path());
    }

    #[test]
    fn test_malformed_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "max_image_bytes = \"lots\"").unwrap();

        assert!(matches!(Config::load(Some(temp.path())), Err(CardboxError::Config(_))));
    }
}
