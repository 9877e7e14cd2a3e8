//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CART_DATA_DIR` - Directory holding the cart slot files (default: `.cart`)
//! - `CART_STORAGE_KEY` - Slot key the cart is stored under (default: `shopping-cart`)
//!
//! A `.env` file in the working directory is loaded first if present.

use std::path::PathBuf;

use shopping_cart_core::CART_STORAGE_KEY;
use shopping_cart_core::slot::validate_key;
use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".cart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Directory for the JSON file slot
    pub data_dir: PathBuf,
    /// Key the cart is persisted under
    pub storage_key: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_key: CART_STORAGE_KEY.to_string(),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = lookup("CART_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or(defaults.data_dir, PathBuf::from);
        let storage_key = lookup("CART_STORAGE_KEY").unwrap_or(defaults.storage_key);
        check_key("CART_STORAGE_KEY", &storage_key)?;

        Ok(Self {
            data_dir,
            storage_key,
        })
    }

    /// Apply command-line overrides on top of the loaded values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the overriding key is not a valid slot key.
    pub fn with_overrides(
        mut self,
        data_dir: Option<PathBuf>,
        storage_key: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        if let Some(key) = storage_key {
            check_key("--key", &key)?;
            self.storage_key = key;
        }
        Ok(self)
    }
}

fn check_key(source: &str, key: &str) -> Result<(), ConfigError> {
    validate_key(key).map_err(|e| ConfigError::InvalidEnvVar(source.to_string(), e.to_string()))
}
