//! Configuration for compose services.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::compose::{MenuView, ViewMode};
use crate::contacts::{DEFAULT_SEARCH_LIMIT, MIN_SEARCH_LIMIT};
use crate::{Error, Result};

/// Settings read from `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Contacts database file.
    pub contacts_db: Option<PathBuf>,
    /// Inventory database file.
    pub inventory_db: Option<PathBuf>,
    /// Maximum candidates returned by a directory search.
    pub search_limit: u32,
    /// Compose view.
    pub view: ViewMode,
    /// Menu label style.
    pub menu_view: MenuView,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            contacts_db: None,
            inventory_db: None,
            search_limit: DEFAULT_SEARCH_LIMIT,
            view: ViewMode::default(),
            menu_view: MenuView::default(),
        }
    }
}

impl ComposeConfig {
    /// Loads configuration from `path`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or if `search_limit` is below [`MIN_SEARCH_LIMIT`].
    pub fn load(path: &Path) -> Result<Self> {
        let config = match std::fs::read_to_string(path) {
            Ok(text) => serde_json::from_str::<Self>(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
            Err(e) => return Err(e.into()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Writes configuration to `path` as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.search_limit < MIN_SEARCH_LIMIT {
            return Err(Error::Config(format!(
                "search_limit must be at least {MIN_SEARCH_LIMIT}, got {}",
                self.search_limit
            )));
        }
        Ok(())
    }
}
