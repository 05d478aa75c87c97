//! Configuration file loading.

use std::path::{Path, PathBuf};

use super::types::Config;
use crate::error::{PaykeysError, Result};

const CONFIG_FILE: &str = "paykeys.kdl";

impl Config {
    /// Get the explicit ~/.config/paykeys/paykeys.kdl path (XDG-style, cross-platform)
    fn xdg_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".config/paykeys").join(CONFIG_FILE))
    }

    /// Get the list of config file search paths in priority order
    fn get_config_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. ./paykeys.kdl (next to the infrastructure it configures)
        paths.push(PathBuf::from(CONFIG_FILE));

        // 2. ~/.config/paykeys/paykeys.kdl
        if let Some(xdg_path) = Self::xdg_config_path() {
            paths.push(xdg_path);
        }

        // 3. Platform-native config directory (~/Library/Application Support/ on macOS)
        // Skip if it's the same as the XDG path (e.g., on Linux where they're identical)
        if let Some(config_dir) = dirs::config_dir() {
            let native_path = config_dir.join("paykeys").join(CONFIG_FILE);
            if Self::xdg_config_path().as_ref() != Some(&native_path) {
                paths.push(native_path);
            }
        }

        paths
    }

    /// Find existing config file by searching all standard locations
    pub fn find_existing_config() -> Option<PathBuf> {
        Self::get_config_search_paths()
            .into_iter()
            .find(|path| path.exists())
    }

    /// Parse configuration from KDL text. `name` is only used in error messages.
    pub fn parse_str(name: &str, content: &str) -> Result<Self> {
        knuffel::parse::<Config>(name, content)
            .map_err(|e| PaykeysError::config(format!("{}: {}", name, e)))
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PaykeysError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse_str(&path.display().to_string(), &content)
    }

    /// Load configuration. An explicit path must exist; otherwise the standard
    /// locations are searched and built-in defaults are used when none exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        match Self::find_existing_config() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load_from_path(&path)
            }
            None => Ok(Config::default()),
        }
    }
}
