//! Cart configuration

use std::{fs, path::Path};

use rusty_money::iso::Currency;
use serde::Deserialize;
use thiserror::Error;

use crate::pricing::{DeliveryPolicy, PriceError, currency_for};

/// Storage key used by the storefront when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid YAML for [`CartConfig`]
    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unsupported currency code
    #[error(transparent)]
    Currency(#[from] PriceError),
}

/// Cart settings, loadable from YAML.
///
/// ```yaml
/// storage_key: cart
/// currency: USD
/// delivery:
///   free_over: "35.00"
///   fee: "2.99"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CartConfig {
    /// Durable store key the cart snapshot is written under
    pub storage_key: String,

    /// ISO currency code prices are displayed in
    pub currency: String,

    /// Delivery fee rule
    pub delivery: DeliveryPolicy,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: "USD".to_string(),
            delivery: DeliveryPolicy::default(),
        }
    }
}

impl CartConfig {
    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or names an unsupported currency.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_norway::from_str(yaml)?;

        config.currency()?;

        Ok(config)
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_yaml_str(&fs::read_to_string(path)?)
    }

    /// Resolved display currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured code is not supported.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        Ok(currency_for(&self.currency)?)
    }
}
