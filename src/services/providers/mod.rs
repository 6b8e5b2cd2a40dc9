//! Weather data provider abstraction.
//!
//! The engine consumes a pre-parsed `WeatherReading`; providers own the
//! network I/O that produces one. Keeping them behind a trait lets tests
//! inject canned conditions and keeps the engine free of HTTP concerns.

use async_trait::async_trait;

use crate::{error::AppResult, models::WeatherSnapshot};

pub mod open_weather;

pub use open_weather::OpenWeatherProvider;

/// Trait for weather data providers
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions for a city, including the temperature-swing flag
    /// derived from the short-term forecast.
    async fn current_weather(&self, city: &str) -> AppResult<WeatherSnapshot>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
