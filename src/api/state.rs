use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{db::HistoryStore, models::GarmentItem, services::providers::WeatherProvider};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Wardrobe catalog, mutable through the API
    pub catalog: Arc<RwLock<Vec<GarmentItem>>>,
    pub history: Arc<dyn HistoryStore>,
    pub weather: Arc<dyn WeatherProvider>,
    /// Inert style preference score fed to the scorer (5.0 = neutral)
    pub style_score: f64,
}

impl AppState {
    pub fn new(
        catalog: Vec<GarmentItem>,
        history: Arc<dyn HistoryStore>,
        weather: Arc<dyn WeatherProvider>,
        style_score: f64,
    ) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            history,
            weather,
            style_score,
        }
    }
}
