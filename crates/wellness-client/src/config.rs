//! # Client Configuration
//!
//! Configuration management for the storefront client.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     WELLNESS_API_URL=https://pharmacy.example.rw/api                   │
//! │     WELLNESS_STRICT_STOCK=true                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.wellness.storefront/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:8080/api, RWF, 2000.00 delivery surcharge         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [api]
//! base_url = "http://localhost:8080/api"
//! only_available = true
//!
//! [store]
//! name = "Wellness Pharmacy"
//! currency_code = "RWF"
//!
//! [checkout]
//! delivery_surcharge_minor = 200000
//! strict_stock = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;
use wellness_core::{Money, StockPolicy, DEFAULT_CURRENCY, HOME_DELIVERY_SURCHARGE};

use crate::error::{ClientError, ClientResult};

// =============================================================================
// API Settings
// =============================================================================

/// Where the pharmacy backend lives and what to ask it for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL all endpoint paths are appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Fetch `/medicines/non-expired` instead of the full list.
    #[serde(default = "default_true")]
    pub only_available: bool,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            only_available: true,
        }
    }
}

// =============================================================================
// Store Settings
// =============================================================================

/// Display-only store details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_name")]
    pub name: String,

    /// Currency label printed next to amounts.
    #[serde(default = "default_currency")]
    pub currency_code: String,
}

fn default_store_name() -> String {
    "Wellness Pharmacy".to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency_code: default_currency(),
        }
    }
}

// =============================================================================
// Checkout Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSettings {
    /// Home delivery fee in minor units.
    #[serde(default = "default_surcharge")]
    pub delivery_surcharge_minor: i64,

    /// Refuse increments past stock instead of capping them silently.
    #[serde(default)]
    pub strict_stock: bool,
}

fn default_surcharge() -> i64 {
    HOME_DELIVERY_SURCHARGE.minor()
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        CheckoutSettings {
            delivery_surcharge_minor: default_surcharge(),
            strict_stock: false,
        }
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub checkout: CheckoutSettings,
}

impl ClientConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Storefront config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        self.base_url()?;

        if self.checkout.delivery_surcharge_minor < 0 {
            return Err(ClientError::InvalidConfig(
                "delivery_surcharge_minor must not be negative".into(),
            ));
        }

        if self.store.currency_code.trim().is_empty() {
            return Err(ClientError::InvalidConfig(
                "currency_code must not be empty".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any `key -> value` lookup.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("WELLNESS_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(name) = lookup("WELLNESS_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(currency) = lookup("WELLNESS_CURRENCY") {
            self.store.currency_code = currency;
        }

        if let Some(value) = lookup("WELLNESS_STRICT_STOCK") {
            match parse_flag(&value) {
                Some(strict) => self.checkout.strict_stock = strict,
                None => warn!(value = %value, "Unknown WELLNESS_STRICT_STOCK value"),
            }
        }

        if let Some(value) = lookup("WELLNESS_ONLY_AVAILABLE") {
            match parse_flag(&value) {
                Some(only) => self.api.only_available = only,
                None => warn!(value = %value, "Unknown WELLNESS_ONLY_AVAILABLE value"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "wellness", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Parsed base URL, always ending in `/` so paths join under it.
    pub fn base_url(&self) -> ClientResult<Url> {
        let mut raw = self.api.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }

        let url = Url::parse(&raw)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ClientError::InvalidUrl(format!(
                "API URL must use http or https, got: {}",
                other
            ))),
        }
    }

    pub fn delivery_surcharge(&self) -> Money {
        Money::from_minor(self.checkout.delivery_surcharge_minor)
    }

    pub fn stock_policy(&self) -> StockPolicy {
        if self.checkout.strict_stock {
            StockPolicy::Strict
        } else {
            StockPolicy::Clamp
        }
    }

    /// `"RWF 2200.00"`.
    pub fn format_money(&self, amount: Money) -> String {
        format!("{} {}", self.store.currency_code, amount)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert!(config.api.only_available);
        assert_eq!(config.store.currency_code, "RWF");
        assert_eq!(config.delivery_surcharge(), Money::from_major(2000));
        assert_eq!(config.stock_policy(), StockPolicy::Clamp);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_url_joins_paths() {
        let config = ClientConfig::default();
        let url = config.base_url().unwrap().join("medicines").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/medicines");
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::default();

        config.api.base_url = "ftp://pharmacy.local/api".to_string();
        assert!(matches!(config.validate(), Err(ClientError::InvalidUrl(_))));

        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "https://pharmacy.example.rw/api".to_string();
        assert!(config.validate().is_ok());

        config.checkout.delivery_surcharge_minor = -1;
        assert!(matches!(config.validate(), Err(ClientError::InvalidConfig(_))));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("WELLNESS_API_URL", "https://pharmacy.example.rw/api"),
            ("WELLNESS_STRICT_STOCK", "yes"),
            ("WELLNESS_ONLY_AVAILABLE", "false"),
            ("WELLNESS_CURRENCY", "USD"),
        ]
        .into_iter()
        .collect();

        let mut config = ClientConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "https://pharmacy.example.rw/api");
        assert_eq!(config.stock_policy(), StockPolicy::Strict);
        assert!(!config.api.only_available);
        assert_eq!(config.format_money(Money::from_major(5)), "USD 5.00");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str("[checkout]\nstrict_stock = true\n").unwrap();
        assert!(config.checkout.strict_stock);
        assert_eq!(config.checkout.delivery_surcharge_minor, 200_000);
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&ClientConfig::default()).unwrap();
        assert!(toml_str.contains("[api]"));
        assert!(toml_str.contains("[store]"));
        assert!(toml_str.contains("[checkout]"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "wellness-storefront-test-{}.toml",
            std::process::id()
        ));
        let mut config = ClientConfig::default();
        config.store.name = "Kimironko Branch".to_string();
        config.save(Some(path.clone())).unwrap();

        let loaded: ClientConfig =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.store.name, "Kimironko Branch");

        std::fs::remove_file(path).unwrap();
    }
}
