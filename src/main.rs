use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use attire_api::{
    api::{create_router, AppState},
    config::Config,
    db::{create_redis_client, Cache, SqliteHistoryStore},
    models::load_catalog,
    services::providers::OpenWeatherProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let history = SqliteHistoryStore::connect(&config.history_url).await?;

    let cache = if config.redis_url.is_empty() {
        None
    } else {
        match create_redis_client(&config.redis_url) {
            Ok(client) => Some(Cache::new(client)),
            Err(e) => {
                tracing::warn!(error = %e, "Redis unavailable, weather cache disabled");
                None
            }
        }
    };

    let catalog = if Path::new(&config.catalog_path).exists() {
        load_catalog(&config.catalog_path)?
    } else {
        tracing::warn!(path = %config.catalog_path, "Catalog file missing, starting with an empty wardrobe");
        Vec::new()
    };
    tracing::info!(items = catalog.len(), "Wardrobe catalog loaded");

    let provider = OpenWeatherProvider::new(
        config.weather_api_key.clone(),
        config.weather_api_url.clone(),
        config.geocoding_api_url.clone(),
        cache,
    );

    let state = AppState::new(
        catalog,
        Arc::new(history),
        Arc::new(provider),
        config.style_score,
    );
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
