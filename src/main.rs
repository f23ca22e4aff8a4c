//! Storefront Basket - basket view service

use anyhow::Result;
use storefront_basket::{config::Settings, routes::{router, AppState}, HttpBackend};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();

    let settings = Settings::from_env()?;
    let backend = HttpBackend::new(&settings.api_url)?;
    let state = AppState { backend, addresses: settings.addresses(), language: settings.language.clone() };

    let app = router(state).layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive());

    tracing::info!("Basket view service listening on 0.0.0.0:{} (backend {})", settings.port, settings.api_url);
    axum::serve(tokio::net::TcpListener::bind(format!("0.0.0.0:{}", settings.port)).await?, app).await?;
    Ok(())
}
