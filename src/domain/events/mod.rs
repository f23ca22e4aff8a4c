//! Basket view events
use crate::dialog::QrCodeDialog;
use crate::ErrorPayload;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BasketEvent {
    /// Full-page replace to the given location.
    Navigated { url: String },
    DialogOpened { dialog: QrCodeDialog },
    RequestFailed { operation: Operation, payload: ErrorPayload },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    LoadBasket,
    LoadConfiguration,
    LoadTranslations,
    FetchItem,
    UpdateItem,
    DeleteItem,
    Checkout,
    ApplyCoupon,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LoadBasket => "load_basket",
            Self::LoadConfiguration => "load_configuration",
            Self::LoadTranslations => "load_translations",
            Self::FetchItem => "fetch_item",
            Self::UpdateItem => "update_item",
            Self::DeleteItem => "delete_item",
            Self::Checkout => "checkout",
            Self::ApplyCoupon => "apply_coupon",
        };
        f.write_str(name)
    }
}
