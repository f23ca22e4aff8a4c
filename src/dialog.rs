//! Payment QR code dialogs.

use crate::domain::value_objects::CryptoCurrency;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

pub const QR_CODE_TEMPLATE: &str = "views/QrCode.html";
pub const QR_CODE_CONTROLLER: &str = "QrCodeController";
pub const QR_CODE_SIZE: &str = "md";

/// Wallet addresses the storefront accepts donations on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAddresses {
    pub bitcoin: String,
    pub dash: String,
    pub ether: String,
}

impl Default for PaymentAddresses {
    fn default() -> Self {
        Self {
            bitcoin: "1AbKfgvw9psQ41NbLi8kufDQTezwG8DRZm".to_string(),
            dash: "Xr556RzuwX6hg5EGpkybbv5RanJoZN17kW".to_string(),
            ether: "0x0f933ab9fCAAA782D0279C300D73750e1311EAE6".to_string(),
        }
    }
}

impl PaymentAddresses {
    pub fn for_currency(&self, currency: CryptoCurrency) -> &str {
        match currency {
            CryptoCurrency::Bitcoin => &self.bitcoin,
            CryptoCurrency::Dash => &self.dash,
            CryptoCurrency::Ether => &self.ether,
        }
    }
}

/// Options for the QR code modal. The four resolved values are computed on
/// access, not when the dialog is opened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrCodeDialog {
    currency: CryptoCurrency,
    address: String,
}

impl QrCodeDialog {
    pub fn new(currency: CryptoCurrency, address: impl Into<String>) -> Self {
        Self { currency, address: address.into() }
    }

    pub fn template_url(&self) -> &'static str { QR_CODE_TEMPLATE }
    pub fn controller(&self) -> &'static str { QR_CODE_CONTROLLER }
    pub fn size(&self) -> &'static str { QR_CODE_SIZE }

    pub fn data(&self) -> String { self.currency.payment_uri(&self.address) }

    /// Explorer page, routed through the same-origin redirect endpoint.
    pub fn url(&self) -> String { redirect_url(&self.currency.explorer_url(&self.address)) }

    pub fn address(&self) -> &str { &self.address }
    pub fn title(&self) -> &'static str { self.currency.title_key() }
}

pub fn redirect_url(target: &str) -> String { format!("/redirect?to={}", target) }

impl Serialize for QrCodeDialog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("QrCodeDialog", 4)?;
        s.serialize_field("templateUrl", self.template_url())?;
        s.serialize_field("controller", self.controller())?;
        s.serialize_field("size", self.size())?;
        s.serialize_field("resolve", &Resolved {
            data: self.data(),
            url: self.url(),
            address: self.address(),
            title: self.title(),
        })?;
        s.end()
    }
}

#[derive(Serialize)]
struct Resolved<'a> {
    data: String,
    url: String,
    address: &'a str,
    title: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitcoin_dialog() {
        let addresses = PaymentAddresses::default();
        let d = QrCodeDialog::new(CryptoCurrency::Bitcoin, addresses.for_currency(CryptoCurrency::Bitcoin));
        assert!(d.data().starts_with("bitcoin:"));
        assert!(d.url().starts_with("/redirect?to=https://blockchain.info/address/"));
        assert_eq!(d.title(), "TITLE_BITCOIN_ADDRESS");
        assert_eq!(d.address(), "1AbKfgvw9psQ41NbLi8kufDQTezwG8DRZm");
    }

    #[test]
    fn test_dash_dialog() {
        let d = QrCodeDialog::new(CryptoCurrency::Dash, "Xr556RzuwX6hg5EGpkybbv5RanJoZN17kW");
        assert_eq!(d.data(), "dash:Xr556RzuwX6hg5EGpkybbv5RanJoZN17kW");
        assert_eq!(d.url(), "/redirect?to=https://explorer.dash.org/address/Xr556RzuwX6hg5EGpkybbv5RanJoZN17kW");
        assert_eq!(d.title(), "TITLE_DASH_ADDRESS");
    }

    #[test]
    fn test_ether_dialog_lowercases_explorer_address() {
        let d = QrCodeDialog::new(CryptoCurrency::Ether, "0x0f933ab9fCAAA782D0279C300D73750e1311EAE6");
        assert_eq!(d.data(), "0x0f933ab9fCAAA782D0279C300D73750e1311EAE6");
        assert_eq!(d.url(), "/redirect?to=https://etherscan.io/address/0x0f933ab9fcaaa782d0279c300d73750e1311eae6");
        assert_eq!(d.title(), "TITLE_ETHER_ADDRESS");
    }

    #[test]
    fn test_dialog_json_shape() {
        let d = QrCodeDialog::new(CryptoCurrency::Dash, "X1");
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["templateUrl"], "views/QrCode.html");
        assert_eq!(v["controller"], "QrCodeController");
        assert_eq!(v["size"], "md");
        assert_eq!(v["resolve"]["data"], "dash:X1");
        assert_eq!(v["resolve"]["address"], "X1");
    }
}
