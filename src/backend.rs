//! Storefront REST backend.

use std::future::Future;

use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::value_objects::{BasketId, BasketItemId, CouponCode};
use crate::i18n::Translations;
use crate::{AppConfiguration, Basket, BasketError, BasketItem, Discount, Envelope, ErrorPayload, OrderConfirmation, QuantityUpdate, Result};

/// REST resources the basket controller talks to.
pub trait BasketBackend: Send + Sync {
    fn find_basket(&self, basket: BasketId) -> impl Future<Output = Result<Basket>> + Send;
    fn basket_item(&self, item: BasketItemId) -> impl Future<Output = Result<BasketItem>> + Send;
    fn update_basket_item(&self, item: BasketItemId, update: QuantityUpdate) -> impl Future<Output = Result<BasketItem>> + Send;
    fn delete_basket_item(&self, item: BasketItemId) -> impl Future<Output = Result<()>> + Send;
    fn checkout(&self, basket: BasketId) -> impl Future<Output = Result<OrderConfirmation>> + Send;
    fn apply_coupon(&self, basket: BasketId, coupon: &CouponCode) -> impl Future<Output = Result<Discount>> + Send;
    fn application_configuration(&self) -> impl Future<Output = Result<AppConfiguration>> + Send;
    fn translations(&self, language: &str) -> impl Future<Output = Result<Translations>> + Send;
}

/// [`BasketBackend`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| BasketError::Config(format!("Invalid backend URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(BasketError::Config(format!("Backend URL cannot be a base: {}", base_url)));
        }
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| BasketError::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { base_url, client })
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        debug!("Backend request method: {}, URL: {}", method, url);
        self.client.request(method, url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(|e| BasketError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(|e| BasketError::Transport(format!("Failed to read error body: {}", e)))?;
            let payload = if body.is_empty() {
                ErrorPayload::text(status.canonical_reason().unwrap_or("Request failed"))
            } else {
                ErrorPayload::from_body(&body)
            };
            return Err(BasketError::Request { status: status.as_u16(), payload });
        }
        response.json::<T>().await.map_err(|e| BasketError::Decode(e.to_string()))
    }
}

impl BasketBackend for HttpBackend {
    async fn find_basket(&self, basket: BasketId) -> Result<Basket> {
        let id = basket.to_string();
        let envelope: Envelope<Basket> = self.send(self.request(Method::GET, &["rest", "basket", &id])).await?;
        Ok(envelope.data)
    }

    async fn basket_item(&self, item: BasketItemId) -> Result<BasketItem> {
        let id = item.to_string();
        let envelope: Envelope<BasketItem> = self.send(self.request(Method::GET, &["api", "BasketItems", &id])).await?;
        Ok(envelope.data)
    }

    async fn update_basket_item(&self, item: BasketItemId, update: QuantityUpdate) -> Result<BasketItem> {
        let id = item.to_string();
        let request = self.request(Method::PUT, &["api", "BasketItems", &id]).json(&update);
        let envelope: Envelope<BasketItem> = self.send(request).await?;
        Ok(envelope.data)
    }

    async fn delete_basket_item(&self, item: BasketItemId) -> Result<()> {
        let id = item.to_string();
        let _: serde_json::Value = self.send(self.request(Method::DELETE, &["api", "BasketItems", &id])).await?;
        Ok(())
    }

    async fn checkout(&self, basket: BasketId) -> Result<OrderConfirmation> {
        let id = basket.to_string();
        self.send(self.request(Method::POST, &["rest", "basket", &id, "checkout"])).await
    }

    async fn apply_coupon(&self, basket: BasketId, coupon: &CouponCode) -> Result<Discount> {
        let id = basket.to_string();
        self.send(self.request(Method::PUT, &["rest", "basket", &id, "coupon", coupon.as_str()])).await
    }

    async fn application_configuration(&self) -> Result<AppConfiguration> {
        self.send(self.request(Method::GET, &["rest", "admin", "application-configuration"])).await
    }

    async fn translations(&self, language: &str) -> Result<Translations> {
        let file = format!("{}.json", language);
        self.send(self.request(Method::GET, &["i18n", &file])).await
    }
}
