//! Basket view service routes.

use axum::{extract::{Path, State}, http::{header, HeaderValue, StatusCode}, response::{IntoResponse, Response}, routing::{delete, get, post, put}, Json, Router};
use serde::Deserialize;
use tracing::warn;
use validator::{Validate, ValidationError};

use crate::backend::BasketBackend;
use crate::controller::BasketController;
use crate::dialog::PaymentAddresses;
use crate::domain::value_objects::{BasketId, BasketItemId, CouponCode, CryptoCurrency};

#[derive(Clone, Debug)]
pub struct AppState<B> { pub backend: B, pub addresses: PaymentAddresses, pub language: String }

impl<B: BasketBackend + Clone> AppState<B> {
    fn controller(&self, bid: i64) -> BasketController<B> {
        BasketController::new(BasketId(bid), self.backend.clone())
            .with_addresses(self.addresses.clone())
            .with_language(self.language.clone())
    }

    async fn ready_controller(&self, bid: i64) -> BasketController<B> {
        let mut controller = self.controller(bid);
        controller.init().await;
        controller
    }
}

pub fn router<B: BasketBackend + Clone + 'static>(state: AppState<B>) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "storefront-basket"})) }))
        .route("/basket/:bid", get(show_basket::<B>))
        .route("/basket/:bid/items/:item", delete(delete_item::<B>))
        .route("/basket/:bid/items/:item/inc", post(increase::<B>))
        .route("/basket/:bid/items/:item/dec", post(decrease::<B>))
        .route("/basket/:bid/coupon", put(apply_coupon::<B>))
        .route("/basket/:bid/checkout", post(checkout::<B>))
        .route("/basket/:bid/qr/:currency", get(qr_code::<B>))
        .with_state(state)
}

fn view_response<B: BasketBackend>(controller: BasketController<B>) -> Response {
    Json(controller.into_view()).into_response()
}

async fn show_basket<B: BasketBackend + Clone>(State(s): State<AppState<B>>, Path(bid): Path<i64>) -> Response {
    view_response(s.ready_controller(bid).await)
}

async fn delete_item<B: BasketBackend + Clone>(State(s): State<AppState<B>>, Path((bid, item)): Path<(i64, i64)>) -> Response {
    let mut c = s.ready_controller(bid).await;
    c.delete(BasketItemId(item)).await;
    view_response(c)
}

async fn increase<B: BasketBackend + Clone>(State(s): State<AppState<B>>, Path((bid, item)): Path<(i64, i64)>) -> Response {
    let mut c = s.ready_controller(bid).await;
    c.inc(BasketItemId(item)).await;
    view_response(c)
}

async fn decrease<B: BasketBackend + Clone>(State(s): State<AppState<B>>, Path((bid, item)): Path<(i64, i64)>) -> Response {
    let mut c = s.ready_controller(bid).await;
    c.dec(BasketItemId(item)).await;
    view_response(c)
}

#[derive(Debug, Deserialize, Validate)]
pub struct CouponRequest {
    #[validate(custom = "non_blank_coupon")]
    pub coupon: String,
}

fn non_blank_coupon(coupon: &str) -> Result<(), ValidationError> {
    CouponCode::new(coupon).map(|_| ()).map_err(|_| ValidationError::new("coupon_empty"))
}

async fn apply_coupon<B: BasketBackend + Clone>(State(s): State<AppState<B>>, Path(bid): Path<i64>, Json(r): Json<CouponRequest>) -> Response {
    if let Err(e) = r.validate() { return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response(); }
    let mut c = s.ready_controller(bid).await;
    c.view_mut().form_mut().input(r.coupon);
    c.apply_coupon().await;
    view_response(c)
}

async fn checkout<B: BasketBackend + Clone>(State(s): State<AppState<B>>, Path(bid): Path<i64>) -> Response {
    let mut c = s.ready_controller(bid).await;
    match c.checkout().await {
        Some(url) => match HeaderValue::from_str(&url) {
            Ok(location) => (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response(),
            Err(e) => {
                warn!(basket = %c.basket_id(), "confirmation URL not usable as redirect: {}", e);
                view_response(c)
            }
        },
        None => view_response(c),
    }
}

async fn qr_code<B: BasketBackend + Clone>(State(s): State<AppState<B>>, Path((bid, currency)): Path<(i64, String)>) -> Response {
    let currency: CryptoCurrency = match currency.parse() {
        Ok(c) => c,
        Err(e) => return (StatusCode::NOT_FOUND, format!("{}", e)).into_response(),
    };
    Json(s.controller(bid).show_qr_code(currency)).into_response()
}
