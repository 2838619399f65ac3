//! CartConfig - storage key, hydration policy and message locale.
//!
//! ```ignore
//! let config = CartConfig::from_env()?.with_locale(Locale::PtBr);
//! let repo = KeyValueCartRepository::from_config(FileKeyValueStore::open(dir)?, &config);
//! let store = CartStore::open_with(oracle, repo, config)?;
//! ```

use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::repository::DEFAULT_STORAGE_KEY;

pub const ENV_STORAGE_KEY: &str = "STOREFRONT_CART_KEY";
pub const ENV_HYDRATION: &str = "STOREFRONT_CART_HYDRATION";
pub const ENV_LOCALE: &str = "STOREFRONT_CART_LOCALE";

/// What to do when the persisted cart cannot be decoded at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HydrationPolicy {
    /// Log a warning and start with an empty cart.
    #[default]
    DefaultEmpty,
    /// Refuse to open the store.
    FailFast,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    #[default]
    En,
    PtBr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Invalid { key: &'static str, value: String },
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { key, value } => {
                write!(f, "invalid value {:?} for {}", value, key)
            }
            ConfigError::Parse(msg) => write!(f, "config parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    pub storage_key: String,
    pub hydration: HydrationPolicy,
    pub locale: Locale,
}

impl Default for CartConfig {
    fn default() -> Self {
        CartConfig {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            hydration: HydrationPolicy::default(),
            locale: Locale::default(),
        }
    }
}

impl CartConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Defaults overridden by `STOREFRONT_CART_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CartConfig::default();

        if let Some(key) = lookup(ENV_STORAGE_KEY) {
            if key.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    key: ENV_STORAGE_KEY,
                    value: key,
                });
            }
            config.storage_key = key;
        }

        if let Some(value) = lookup(ENV_HYDRATION) {
            config.hydration = match value.to_ascii_lowercase().as_str() {
                "default-empty" => HydrationPolicy::DefaultEmpty,
                "fail-fast" => HydrationPolicy::FailFast,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: ENV_HYDRATION,
                        value,
                    })
                }
            };
        }

        if let Some(value) = lookup(ENV_LOCALE) {
            config.locale = match value.to_ascii_lowercase().as_str() {
                "en" => Locale::En,
                "pt-br" | "pt_br" => Locale::PtBr,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: ENV_LOCALE,
                        value,
                    })
                }
            };
        }

        Ok(config)
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_hydration(mut self, hydration: HydrationPolicy) -> Self {
        self.hydration = hydration;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}
