//! Value Objects for the basket view

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Basket identifier, handed to the controller by whoever owns the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BasketId(pub i64);

impl fmt::Display for BasketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BasketItemId(pub i64);

impl fmt::Display for BasketItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// Coupon code value object
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CouponCode(String);

impl CouponCode {
    pub fn new(value: impl Into<String>) -> Result<Self, CouponError> {
        let value = value.into();
        if value.trim().is_empty() { return Err(CouponError::Empty); }
        Ok(Self(value))
    }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum CouponError { Empty }
impl std::error::Error for CouponError {}
impl fmt::Display for CouponError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Coupon code empty") }
}

/// Quantity to send for a basket item. Never below one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity(i64);

impl Quantity {
    /// Next quantity after adding `delta` to the fetched `current` value.
    /// A fetched value of zero or less is treated as tampered and reset to one.
    pub fn adjusted(current: i64, delta: i64) -> Self {
        if current < 1 { return Self(1); }
        Self(current.saturating_add(delta).max(1))
    }
    pub fn increased(current: i64) -> Self { Self::adjusted(current, 1) }
    pub fn decreased(current: i64) -> Self { Self::adjusted(current, -1) }
    pub fn value(&self) -> i64 { self.0 }
}

/// Text shown in the view. Escaped on render unless explicitly trusted as raw HTML.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayField {
    text: String,
    raw: bool,
}

impl DisplayField {
    pub fn text(text: impl Into<String>) -> Self { Self { text: text.into(), raw: false } }

    /// Renders verbatim, markup included. Product descriptions go through here.
    pub fn trusted_html(html: impl Into<String>) -> Self { Self { text: html.into(), raw: true } }

    pub fn is_raw(&self) -> bool { self.raw }
    pub fn source(&self) -> &str { &self.text }

    pub fn render(&self) -> String {
        if self.raw { self.text.clone() } else { escape_html(&self.text) }
    }
}

impl Serialize for DisplayField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.render())
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Currencies the basket offers a payment QR code for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CryptoCurrency {
    Bitcoin,
    Dash,
    Ether,
}

impl CryptoCurrency {
    pub fn title_key(&self) -> &'static str {
        match self {
            Self::Bitcoin => "TITLE_BITCOIN_ADDRESS",
            Self::Dash => "TITLE_DASH_ADDRESS",
            Self::Ether => "TITLE_ETHER_ADDRESS",
        }
    }

    /// Block explorer page listing an address.
    pub fn explorer_url(&self, address: &str) -> String {
        match self {
            Self::Bitcoin => format!("https://blockchain.info/address/{}", address),
            Self::Dash => format!("https://explorer.dash.org/address/{}", address),
            Self::Ether => format!("https://etherscan.io/address/{}", address.to_lowercase()),
        }
    }

    /// Payload encoded into the QR code.
    pub fn payment_uri(&self, address: &str) -> String {
        match self {
            Self::Bitcoin => format!("bitcoin:{}", address),
            Self::Dash => format!("dash:{}", address),
            // wallets scan plain 0x addresses
            Self::Ether => address.to_string(),
        }
    }
}

impl FromStr for CryptoCurrency {
    type Err = UnknownCurrency;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bitcoin" | "btc" => Ok(Self::Bitcoin),
            "dash" => Ok(Self::Dash),
            "ether" | "eth" => Ok(Self::Ether),
            _ => Err(UnknownCurrency(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub struct UnknownCurrency(pub String);
impl std::error::Error for UnknownCurrency {}
impl fmt::Display for UnknownCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Unknown currency: {}", self.0) }
}
