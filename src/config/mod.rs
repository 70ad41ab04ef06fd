//! Configuration management
//!
//! Settings live in `<store dir>/session-aliases.yaml`, where the store
//! directory is `$SESSION_ALIASES_HOME` or `~/.claude`. The file is
//! optional; environment variables override it.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Overrides the store directory.
pub const HOME_ENV: &str = "SESSION_ALIASES_HOME";

/// Overrides the alias document path.
pub const FILE_ENV: &str = "SESSION_ALIASES_FILE";

/// File name of the alias document inside the store directory.
pub const ALIASES_FILE_NAME: &str = "session-aliases.json";

/// File name of the optional config file inside the store directory.
pub const CONFIG_FILE_NAME: &str = "session-aliases.yaml";

/// Directory beside the alias file holding session files.
pub const SESSIONS_DIR_NAME: &str = "sessions";

/// Default number of aliases shown by `list`.
pub const DEFAULT_LIST_LIMIT: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Alias document location. Relative paths resolve against the
    /// store directory.
    pub aliases_file: Option<PathBuf>,

    /// Default limit for `list`
    pub list_limit: Option<usize>,
}

impl Config {
    /// Loads the config file from the store directory.
    ///
    /// Returns defaults if the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads a config file from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Directory holding the alias document and config file.
    pub fn store_dir() -> Result<PathBuf> {
        if let Some(home) = env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(home));
        }

        let dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?
            .join(".claude");
        Ok(dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::store_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Directory that relative session paths are checked against during
    /// cleanup: `sessions/` next to the resolved alias file.
    pub fn sessions_dir(&self) -> Result<PathBuf> {
        Ok(sessions_dir_for(&self.aliases_path()?))
    }

    /// Resolved alias document path, honoring `$SESSION_ALIASES_FILE`.
    pub fn aliases_path(&self) -> Result<PathBuf> {
        let file_override = env::var_os(FILE_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Ok(self.aliases_path_in(&Self::store_dir()?, file_override))
    }

    /// Resolves the alias document path against a given store directory.
    ///
    /// Precedence: `file_override`, then `aliases_file`, then the default
    /// file name.
    pub fn aliases_path_in(&self, store_dir: &Path, file_override: Option<PathBuf>) -> PathBuf {
        match file_override.or_else(|| self.aliases_file.clone()) {
            Some(path) if path.is_absolute() => path,
            Some(path) => store_dir.join(path),
            None => store_dir.join(ALIASES_FILE_NAME),
        }
    }

    /// Default limit for `list`.
    pub fn list_limit(&self) -> usize {
        self.list_limit.unwrap_or(DEFAULT_LIST_LIMIT)
    }
}

/// The `sessions/` directory beside an alias file.
pub fn sessions_dir_for(aliases_path: &Path) -> PathBuf {
    match aliases_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(SESSIONS_DIR_NAME),
        _ => PathBuf::from(SESSIONS_DIR_NAME),
    }
}
