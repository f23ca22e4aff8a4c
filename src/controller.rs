//! Basket view-controller.
//!
//! Forwards user actions to the storefront backend and copies the results onto
//! a [`BasketView`]. Failures are logged, recorded as [`BasketEvent::RequestFailed`]
//! and otherwise swallowed; only the coupon flow shows them to the user.

use tracing::{debug, info, warn};

use crate::backend::BasketBackend;
use crate::dialog::{PaymentAddresses, QrCodeDialog};
use crate::domain::aggregates::BasketView;
use crate::domain::events::{BasketEvent, Operation};
use crate::domain::value_objects::{BasketId, BasketItemId, CouponCode, CryptoCurrency, Quantity};
use crate::i18n::{Translations, DISCOUNT_APPLIED};
use crate::{BasketError, QuantityUpdate};

pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug)]
pub struct BasketController<B> {
    basket_id: BasketId,
    backend: B,
    addresses: PaymentAddresses,
    language: String,
    translations: Translations,
    view: BasketView,
}

impl<B: BasketBackend> BasketController<B> {
    pub fn new(basket_id: BasketId, backend: B) -> Self {
        Self {
            basket_id,
            backend,
            addresses: PaymentAddresses::default(),
            language: DEFAULT_LANGUAGE.to_string(),
            translations: Translations::default(),
            view: BasketView::new(),
        }
    }

    pub fn with_addresses(mut self, addresses: PaymentAddresses) -> Self { self.addresses = addresses; self }
    pub fn with_language(mut self, language: impl Into<String>) -> Self { self.language = language.into(); self }

    pub fn basket_id(&self) -> BasketId { self.basket_id }
    pub fn view(&self) -> &BasketView { &self.view }
    pub fn view_mut(&mut self) -> &mut BasketView { &mut self.view }
    pub fn into_view(self) -> BasketView { self.view }

    /// Fetches basket, branding configuration and translations side by side.
    /// Each fetch succeeds or fails on its own.
    pub async fn init(&mut self) {
        let (basket, config, translations) = tokio::join!(
            self.backend.find_basket(self.basket_id),
            self.backend.application_configuration(),
            self.backend.translations(&self.language),
        );
        match basket {
            Ok(basket) => self.view.show_products(basket.products),
            Err(e) => self.fail(Operation::LoadBasket, e),
        }
        match config {
            Ok(config) => self.view.apply_branding(&config),
            Err(e) => self.fail(Operation::LoadConfiguration, e),
        }
        match translations {
            Ok(translations) => self.translations = translations,
            Err(e) => self.fail(Operation::LoadTranslations, e),
        }
    }

    pub async fn load_basket(&mut self) {
        match self.backend.find_basket(self.basket_id).await {
            Ok(basket) => {
                debug!(basket = %self.basket_id, products = basket.products.len(), "basket loaded");
                self.view.show_products(basket.products);
            }
            Err(e) => self.fail(Operation::LoadBasket, e),
        }
    }

    pub async fn delete(&mut self, item: BasketItemId) {
        match self.backend.delete_basket_item(item).await {
            Ok(()) => self.load_basket().await,
            Err(e) => self.fail(Operation::DeleteItem, e),
        }
    }

    /// Returns the confirmation URL navigated to, if checkout went through.
    pub async fn checkout(&mut self) -> Option<String> {
        match self.backend.checkout(self.basket_id).await {
            Ok(confirmation) => {
                let url = confirmation.order_confirmation;
                info!(basket = %self.basket_id, url = %url, "checkout complete");
                self.view.raise_event(BasketEvent::Navigated { url: url.clone() });
                Some(url)
            }
            Err(e) => {
                self.fail(Operation::Checkout, e);
                None
            }
        }
    }

    pub async fn inc(&mut self, item: BasketItemId) { self.change_quantity(item, Quantity::increased).await }
    pub async fn dec(&mut self, item: BasketItemId) { self.change_quantity(item, Quantity::decreased).await }

    async fn change_quantity(&mut self, item: BasketItemId, next: fn(i64) -> Quantity) {
        let current = match self.backend.basket_item(item).await {
            Ok(current) => current,
            Err(e) => return self.fail(Operation::FetchItem, e),
        };
        let update = QuantityUpdate { quantity: next(current.quantity).value() };
        match self.backend.update_basket_item(item, update).await {
            Ok(_) => self.load_basket().await,
            Err(e) => self.fail(Operation::UpdateItem, e),
        }
    }

    /// Redeems whatever is typed into the coupon form.
    pub async fn apply_coupon(&mut self) {
        let coupon = match CouponCode::new(self.view.form().coupon()) {
            Ok(coupon) => coupon,
            Err(e) => {
                debug!(basket = %self.basket_id, "coupon not sent: {}", e);
                return;
            }
        };
        match self.backend.apply_coupon(self.basket_id, &coupon).await {
            Ok(discount) => {
                let message = self.translations.translate(DISCOUNT_APPLIED, &[("discount", discount.discount.to_string())]);
                self.view.coupon_accepted(message);
            }
            Err(e) => {
                self.view.coupon_rejected(e.payload().to_string());
                self.fail(Operation::ApplyCoupon, e);
            }
        }
    }

    pub fn show_bitcoin_qr_code(&mut self) -> QrCodeDialog { self.show_qr_code(CryptoCurrency::Bitcoin) }
    pub fn show_dash_qr_code(&mut self) -> QrCodeDialog { self.show_qr_code(CryptoCurrency::Dash) }
    pub fn show_ether_qr_code(&mut self) -> QrCodeDialog { self.show_qr_code(CryptoCurrency::Ether) }

    pub fn show_qr_code(&mut self, currency: CryptoCurrency) -> QrCodeDialog {
        let dialog = QrCodeDialog::new(currency, self.addresses.for_currency(currency));
        self.view.raise_event(BasketEvent::DialogOpened { dialog: dialog.clone() });
        dialog
    }

    fn fail(&mut self, operation: Operation, error: BasketError) {
        let payload = error.payload();
        warn!(basket = %self.basket_id, operation = %operation, "{}", payload);
        self.view.raise_event(BasketEvent::RequestFailed { operation, payload });
    }
}
