//! Storefront Basket
//!
//! View-controller for the storefront shopping basket.
//!
//! ## Features
//! - Basket contents with trusted-markup product descriptions
//! - Item quantity changes that never drop below one
//! - Coupon redemption with translated confirmation
//! - Cryptocurrency payment QR dialogs
//! - Checkout redirect to the order confirmation
//! - Basket view service exposing the controller over HTTP

pub mod backend;
pub mod config;
pub mod controller;
pub mod dialog;
pub mod domain;
pub mod i18n;
pub mod routes;

pub use backend::{BasketBackend, HttpBackend};
pub use controller::BasketController;
pub use dialog::{PaymentAddresses, QrCodeDialog};
pub use domain::aggregates::{BasketLine, BasketView, Branding, CouponForm};
pub use domain::events::{BasketEvent, Operation};
pub use domain::value_objects::{BasketId, BasketItemId, CouponCode, CryptoCurrency, DisplayField, Quantity};
pub use i18n::Translations;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

// =============================================================================
// Wire Types
// =============================================================================

/// `{data: ...}` wrapper used by most backend responses.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    #[serde(default, alias = "Products")]
    pub products: Vec<Product>,
}

/// Product as listed in a basket, joined with its basket item.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, alias = "BasketItem")]
    pub basket_item: Option<BasketItem>,
}

/// Server-side quantity record of a product in a basket.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketItem {
    pub id: i64,
    #[serde(default)]
    pub quantity: i64,
}

/// Body of a basket item update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityUpdate {
    pub quantity: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_confirmation: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub discount: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfiguration {
    #[serde(default)]
    pub config: ConfigBody,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigBody {
    #[serde(default)]
    pub application: ApplicationSettings,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSettings {
    #[serde(default)]
    pub twitter_url: Option<String>,
    #[serde(default)]
    pub facebook_url: Option<String>,
}

// =============================================================================
// Error Types
// =============================================================================

/// Error body returned by the backend, kept verbatim.
///
/// Plain-text bodies become a JSON string, JSON bodies are kept as parsed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorPayload(pub Value);

impl ErrorPayload {
    pub fn text(text: impl Into<String>) -> Self { Self(Value::String(text.into())) }

    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).map(Self).unwrap_or_else(|_| Self::text(body))
    }

    pub fn as_value(&self) -> &Value { &self.0 }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BasketError {
    #[error("Request failed with status {status}: {payload}")]
    Request { status: u16, payload: ErrorPayload },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Undecodable response: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BasketError {
    /// What gets logged and shown for this failure: the server body when
    /// there is one, the error text otherwise.
    pub fn payload(&self) -> ErrorPayload {
        match self {
            Self::Request { payload, .. } => payload.clone(),
            other => ErrorPayload::text(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, BasketError>;
