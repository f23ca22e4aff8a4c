//! Aggregates module
pub mod basket;

pub use basket::{BasketLine, BasketView, Branding, CouponForm};
