//! Basket View Aggregate

use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::domain::events::BasketEvent;
use crate::domain::value_objects::DisplayField;
use crate::{AppConfiguration, BasketItem, Product};

pub const DEFAULT_TWITTER_URL: &str = "https://twitter.com/owasp_juiceshop";
pub const DEFAULT_FACEBOOK_URL: &str = "https://www.facebook.com/owasp.juiceshop";

/// One product row of the basket as the view renders it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketLine {
    pub id: Option<i64>,
    pub name: DisplayField,
    pub description: DisplayField,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub basket_item: Option<BasketItem>,
}

impl From<Product> for BasketLine {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: DisplayField::text(p.name),
            description: DisplayField::trusted_html(p.description),
            price: p.price,
            image: p.image,
            basket_item: p.basket_item,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    pub twitter_url: String,
    pub facebook_url: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self { twitter_url: DEFAULT_TWITTER_URL.to_string(), facebook_url: DEFAULT_FACEBOOK_URL.to_string() }
    }
}

impl From<&AppConfiguration> for Branding {
    fn from(c: &AppConfiguration) -> Self {
        let app = &c.config.application;
        Self {
            twitter_url: app.twitter_url.clone().unwrap_or_else(|| DEFAULT_TWITTER_URL.to_string()),
            facebook_url: app.facebook_url.clone().unwrap_or_else(|| DEFAULT_FACEBOOK_URL.to_string()),
        }
    }
}

/// Coupon input control.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CouponForm {
    coupon: String,
    pristine: bool,
}

impl Default for CouponForm {
    fn default() -> Self { Self { coupon: String::new(), pristine: true } }
}

impl CouponForm {
    pub fn input(&mut self, code: impl Into<String>) { self.coupon = code.into(); self.pristine = false; }
    pub fn set_pristine(&mut self) { self.pristine = true; }
    pub fn coupon(&self) -> &str { &self.coupon }
    pub fn is_pristine(&self) -> bool { self.pristine }
}

/// View-bindable basket state.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketView {
    products: Option<Vec<BasketLine>>,
    form: CouponForm,
    confirmation: Option<String>,
    error: Option<String>,
    #[serde(flatten)]
    branding: Branding,
    loaded_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    events: Vec<BasketEvent>,
}

impl BasketView {
    pub fn new() -> Self { Self::default() }

    pub fn products(&self) -> Option<&[BasketLine]> { self.products.as_deref() }
    pub fn form(&self) -> &CouponForm { &self.form }
    pub fn form_mut(&mut self) -> &mut CouponForm { &mut self.form }
    pub fn confirmation(&self) -> Option<&str> { self.confirmation.as_deref() }
    pub fn error(&self) -> Option<&str> { self.error.as_deref() }
    pub fn twitter_url(&self) -> &str { &self.branding.twitter_url }
    pub fn facebook_url(&self) -> &str { &self.branding.facebook_url }
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> { self.loaded_at }

    /// Replaces the product list. Descriptions become trusted markup.
    pub fn show_products(&mut self, products: Vec<Product>) {
        self.products = Some(products.into_iter().map(BasketLine::from).collect());
        self.loaded_at = Some(Utc::now());
    }

    pub fn apply_branding(&mut self, config: &AppConfiguration) { self.branding = Branding::from(config); }

    pub fn coupon_accepted(&mut self, confirmation: String) {
        self.form.set_pristine();
        self.confirmation = Some(confirmation);
        self.error = None;
    }

    pub fn coupon_rejected(&mut self, error: String) {
        self.form.set_pristine();
        self.confirmation = None;
        self.error = Some(error);
    }

    pub fn take_events(&mut self) -> Vec<BasketEvent> { std::mem::take(&mut self.events) }
    pub(crate) fn raise_event(&mut self, e: BasketEvent) { self.events.push(e); }
}
