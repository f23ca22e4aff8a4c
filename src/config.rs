//! Environment configuration for the basket view service

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dialog::PaymentAddresses;
use crate::{BasketError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_PORT: u16 = 8084;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Settings {
    /// Storefront backend the controller calls
    #[validate(url)]
    pub api_url: String,
    pub port: u16,
    /// Translation catalogue to load, e.g. `en` or `de_DE`
    #[validate(length(min = 1))]
    pub language: String,
    #[validate(length(min = 1))]
    pub bitcoin_address: String,
    #[validate(length(min = 1))]
    pub dash_address: String,
    #[validate(length(min = 1))]
    pub ether_address: String,
}

impl Default for Settings {
    fn default() -> Self {
        let addresses = PaymentAddresses::default();
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            port: DEFAULT_PORT,
            language: crate::controller::DEFAULT_LANGUAGE.to_string(),
            bitcoin_address: addresses.bitcoin,
            dash_address: addresses.dash,
            ether_address: addresses.ether,
        }
    }
}

impl Settings {
    /// Reads `BASKET_API_URL`, `PORT`, `BASKET_LANGUAGE` and the
    /// `*_ADDRESS` wallet overrides from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let port = match lookup("PORT") {
            Some(p) => p.parse().map_err(|_| BasketError::Config(format!("Invalid PORT: {}", p)))?,
            None => defaults.port,
        };
        let settings = Self {
            api_url: lookup("BASKET_API_URL").unwrap_or(defaults.api_url),
            port,
            language: lookup("BASKET_LANGUAGE").unwrap_or(defaults.language),
            bitcoin_address: lookup("BITCOIN_ADDRESS").unwrap_or(defaults.bitcoin_address),
            dash_address: lookup("DASH_ADDRESS").unwrap_or(defaults.dash_address),
            ether_address: lookup("ETHER_ADDRESS").unwrap_or(defaults.ether_address),
        };
        settings.validate().map_err(|e| BasketError::Config(e.to_string()))?;
        Ok(settings)
    }

    pub fn addresses(&self) -> PaymentAddresses {
        PaymentAddresses {
            bitcoin: self.bitcoin_address.clone(),
            dash: self.dash_address.clone(),
            ether: self.ether_address.clone(),
        }
    }
}
