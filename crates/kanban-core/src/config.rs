use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_BOARD_TITLE: &str = "My Kanban Board";
const DEFAULT_MIN_CARDS_PER_COLUMN: usize = 2;
const DEFAULT_MAX_CARDS_PER_COLUMN: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Board file used when neither `--file` nor `KANBAN_FILE` is given.
    #[serde(default)]
    pub default_file: Option<PathBuf>,
    #[serde(default)]
    pub board_title: Option<String>,
    #[serde(default)]
    pub min_cards_per_column: Option<usize>,
    #[serde(default)]
    pub max_cards_per_column: Option<usize>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/kanban/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("kanban/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("kanban\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Reads a config file, falling back to defaults when it is missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            if let Ok(content) = std::fs::read_to_string(path) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
            }
        }
        Self::default()
    }

    pub fn effective_board_title(&self) -> &str {
        self.board_title.as_deref().unwrap_or(DEFAULT_BOARD_TITLE)
    }

    /// Inclusive range of cards generated per seeded column.
    ///
    /// A maximum below the minimum is raised to the minimum.
    pub fn effective_cards_per_column(&self) -> (usize, usize) {
        let min = self
            .min_cards_per_column
            .unwrap_or(DEFAULT_MIN_CARDS_PER_COLUMN);
        let max = self
            .max_cards_per_column
            .unwrap_or(DEFAULT_MAX_CARDS_PER_COLUMN)
            .max(min);
        (min, max)
    }
}
