//! Path management for Accounter
//!
//! Provides XDG-compliant path resolution for configuration and data.
//!
//! ## Path Resolution Order
//!
//! 1. `ACCOUNTER_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/accounter` or `~/.config/accounter`
//! 3. Windows: `%APPDATA%\accounter`

use std::path::PathBuf;

use super::settings::Settings;
use crate::error::AccounterError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "ACCOUNTER_DATA_DIR";

/// Manages all paths used by Accounter
#[derive(Debug, Clone)]
pub struct AccounterPaths {
    base_dir: PathBuf,
}

impl AccounterPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home or application data directory can be
    /// determined.
    pub fn new() -> Result<Self, AccounterError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create AccounterPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/accounter/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Transactions document, named by the settings
    pub fn transactions_file(&self, settings: &Settings) -> PathBuf {
        self.data_dir().join(&settings.transactions_file)
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), AccounterError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| AccounterError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| AccounterError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if Accounter has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, AccounterError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                AccounterError::Config("Could not determine home directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("accounter"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, AccounterError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| AccounterError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("accounter"))
}
