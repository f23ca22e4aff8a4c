#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use storefront_basket::{
    AppConfiguration, Basket, BasketBackend, BasketError, BasketId, BasketItem, BasketItemId, CouponCode, Discount,
    ErrorPayload, OrderConfirmation, Product, QuantityUpdate, Result, Translations,
};

pub const BID: BasketId = BasketId(42);

/// Requests seen by [`FakeBackend`], in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    FindBasket(i64),
    GetItem(i64),
    UpdateItem(i64, i64),
    DeleteItem(i64),
    Checkout(i64),
    ApplyCoupon(i64, String),
    Configuration,
    Translations(String),
}

/// Replies handed out front to back; the last one keeps answering.
#[derive(Debug)]
struct Replies<T>(VecDeque<Result<T>>);

impl<T> Default for Replies<T> {
    fn default() -> Self { Self(VecDeque::new()) }
}

impl<T: Clone> Replies<T> {
    fn next(&mut self) -> Result<T> {
        let reply = if self.0.len() > 1 { self.0.pop_front() } else { self.0.front().cloned() };
        reply.unwrap_or_else(|| Err(failure(404, "no reply scripted")))
    }
}

#[derive(Debug, Default)]
struct Script {
    baskets: Replies<Basket>,
    items: Replies<BasketItem>,
    updates: Replies<BasketItem>,
    deletes: Replies<()>,
    checkouts: Replies<OrderConfirmation>,
    coupons: Replies<Discount>,
    configuration: Replies<AppConfiguration>,
    translations: Replies<Translations>,
    calls: Vec<Call>,
}

/// In-memory storefront that answers with scripted replies and records requests.
#[derive(Clone, Debug, Default)]
pub struct FakeBackend {
    script: Arc<Mutex<Script>>,
}

pub fn failure(status: u16, body: &str) -> BasketError {
    BasketError::Request { status, payload: ErrorPayload::text(body) }
}

pub fn basket(products: Vec<Product>) -> Basket { Basket { products } }

pub fn line(item_id: i64, quantity: i64) -> Product {
    Product { basket_item: Some(BasketItem { id: item_id, quantity }), ..Default::default() }
}

impl FakeBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.on_configuration(Ok(AppConfiguration::default()));
        backend.on_translations(Ok(Translations::default()));
        backend
    }

    fn with<R>(&self, f: impl FnOnce(&mut Script) -> R) -> R {
        let mut script = self.script.lock().unwrap();
        f(&mut script)
    }

    pub fn on_basket(&self, reply: Result<Basket>) -> &Self { self.with(|s| s.baskets.0.push_back(reply)); self }
    pub fn on_item(&self, reply: Result<BasketItem>) -> &Self { self.with(|s| s.items.0.push_back(reply)); self }
    pub fn on_update(&self, reply: Result<BasketItem>) -> &Self { self.with(|s| s.updates.0.push_back(reply)); self }
    pub fn on_delete(&self, reply: Result<()>) -> &Self { self.with(|s| s.deletes.0.push_back(reply)); self }
    pub fn on_checkout(&self, reply: Result<OrderConfirmation>) -> &Self { self.with(|s| s.checkouts.0.push_back(reply)); self }
    pub fn on_coupon(&self, reply: Result<Discount>) -> &Self { self.with(|s| s.coupons.0.push_back(reply)); self }

    pub fn on_configuration(&self, reply: Result<AppConfiguration>) -> &Self {
        self.with(|s| { s.configuration.0.clear(); s.configuration.0.push_back(reply) });
        self
    }

    pub fn on_translations(&self, reply: Result<Translations>) -> &Self {
        self.with(|s| { s.translations.0.clear(); s.translations.0.push_back(reply) });
        self
    }

    pub fn calls(&self) -> Vec<Call> { self.with(|s| s.calls.clone()) }

    pub fn count(&self, wanted: impl Fn(&Call) -> bool) -> usize { self.calls().iter().filter(|c| wanted(c)).count() }

    pub fn updates(&self) -> Vec<(i64, i64)> {
        self.calls().into_iter().filter_map(|c| match c { Call::UpdateItem(id, q) => Some((id, q)), _ => None }).collect()
    }
}

impl BasketBackend for FakeBackend {
    async fn find_basket(&self, basket: BasketId) -> Result<Basket> {
        self.with(|s| { s.calls.push(Call::FindBasket(basket.0)); s.baskets.next() })
    }

    async fn basket_item(&self, item: BasketItemId) -> Result<BasketItem> {
        self.with(|s| { s.calls.push(Call::GetItem(item.0)); s.items.next() })
    }

    async fn update_basket_item(&self, item: BasketItemId, update: QuantityUpdate) -> Result<BasketItem> {
        self.with(|s| { s.calls.push(Call::UpdateItem(item.0, update.quantity)); s.updates.next() })
    }

    async fn delete_basket_item(&self, item: BasketItemId) -> Result<()> {
        self.with(|s| { s.calls.push(Call::DeleteItem(item.0)); s.deletes.next() })
    }

    async fn checkout(&self, basket: BasketId) -> Result<OrderConfirmation> {
        self.with(|s| { s.calls.push(Call::Checkout(basket.0)); s.checkouts.next() })
    }

    async fn apply_coupon(&self, basket: BasketId, coupon: &CouponCode) -> Result<Discount> {
        let code = coupon.as_str().to_string();
        self.with(|s| { s.calls.push(Call::ApplyCoupon(basket.0, code)); s.coupons.next() })
    }

    async fn application_configuration(&self) -> Result<AppConfiguration> {
        self.with(|s| { s.calls.push(Call::Configuration); s.configuration.next() })
    }

    async fn translations(&self, language: &str) -> Result<Translations> {
        let language = language.to_string();
        self.with(|s| { s.calls.push(Call::Translations(language)); s.translations.next() })
    }
}
