//! User settings for Accounter
//!
//! Stored as `config.json` in the base directory. Every field has a default so
//! older or hand-edited files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::AccounterPaths;
use crate::error::AccounterError;
use crate::models::UserId;
use crate::storage::write_json_atomic;

/// User settings for Accounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// User that commands act on when `--user` is not given
    #[serde(default = "default_user_id")]
    pub default_user_id: UserId,

    /// File name of the transactions document inside the data directory
    #[serde(default = "default_transactions_file")]
    pub transactions_file: String,

    /// Page size used by `list` when none is given
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Log filter used when `ACCOUNTER_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_user_id() -> UserId {
    UserId::new(1)
}

fn default_transactions_file() -> String {
    "accounters.json".to_string()
}

fn default_page_size() -> usize {
    20
}

fn default_currency() -> String {
    "¥".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_user_id: default_user_id(),
            transactions_file: default_transactions_file(),
            default_page_size: default_page_size(),
            currency_symbol: default_currency(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &AccounterPaths) -> Result<Self, AccounterError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| AccounterError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            AccounterError::Config(format!("Failed to parse settings file: {}", e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AccounterPaths) -> Result<(), AccounterError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Reject values the rest of the program cannot work with
    pub fn validate(&self) -> Result<(), AccounterError> {
        if self.default_page_size == 0 {
            return Err(AccounterError::Config(
                "default_page_size must be at least 1".into(),
            ));
        }

        let file = self.transactions_file.trim();
        if file.is_empty() || file.contains('/') || file.contains('\\') {
            return Err(AccounterError::Config(format!(
                "transactions_file must be a plain file name, got '{}'",
                self.transactions_file
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.default_user_id, UserId::new(1));
        assert_eq!(settings.transactions_file, "accounters.json");
        assert_eq!(settings.default_page_size, 20);
        assert_eq!(settings.currency_symbol, "¥");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AccounterPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            default_user_id: UserId::new(7),
            default_page_size: 5,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AccounterPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"currency_symbol": "$"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "$");
        assert_eq!(loaded.default_page_size, 20);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AccounterPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"default_page_size": 0}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, AccounterError::Config(_)));
    }
}
