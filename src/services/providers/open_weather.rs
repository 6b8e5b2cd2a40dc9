/// OpenWeatherMap provider
///
/// API flow:
/// 1. Geocoding: /direct?q={city} → lat/lon (falls back to a plain q= query)
/// 2. Current weather: /weather?lat=&lon=&units=metric
/// 3. Forecast: /forecast?cnt=8 → next 24 h of 3-hourly slots, used to set
///    the temperature-swing flag
///
/// Snapshots are cached in Redis when a cache is configured; cache failures
/// are treated as misses.
use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{WeatherReading, WeatherSnapshot, WeatherSource},
    services::providers::WeatherProvider,
};

const WEATHER_CACHE_TTL: u64 = 600; // 10 minutes
/// Forecast spread at or above which conditions count as volatile, in °C
const TEMP_SWING_SPREAD_C: f64 = 8.0;
/// Next 24 h of the 3-hourly forecast
const FORECAST_SLOTS: u32 = 8;
const MS_TO_KMH: f64 = 3.6;

#[derive(Debug, Deserialize)]
struct ApiMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ApiWind {
    speed: f64,
}

#[derive(Debug, Deserialize, Default)]
struct ApiRain {
    #[serde(rename = "1h", default)]
    one_hour: f64,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    description: String,
}

/// Response from GET /weather
#[derive(Debug, Deserialize)]
struct ApiWeatherResponse {
    main: ApiMain,
    wind: ApiWind,
    #[serde(default)]
    rain: Option<ApiRain>,
    weather: Vec<ApiCondition>,
    #[serde(default)]
    name: Option<String>,
}

/// Response from GET /forecast
#[derive(Debug, Deserialize)]
struct ApiForecastResponse {
    list: Vec<ApiForecastSlot>,
}

#[derive(Debug, Deserialize)]
struct ApiForecastSlot {
    main: ApiMain,
}

/// Response entry from the geocoding API
#[derive(Debug, Deserialize)]
struct GeoLocation {
    lat: f64,
    lon: f64,
    name: String,
    #[serde(default)]
    country: String,
}

pub struct OpenWeatherProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    geo_url: String,
    cache: Option<Cache>,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, api_url: String, geo_url: String, cache: Option<Cache>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            geo_url,
            cache,
        }
    }

    /// Resolve a city name to coordinates. Geocoding failures are not fatal;
    /// the weather call falls back to a plain city-name query.
    async fn resolve_city(&self, city: &str) -> Option<GeoLocation> {
        let url = format!("{}/direct", self.geo_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("q", city), ("limit", "1"), ("appid", self.api_key.as_str())])
            .send()
            .await;

        let response = match response {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                tracing::warn!(city = %city, status = %r.status(), "Geocoding request failed");
                return None;
            }
            Err(e) => {
                tracing::warn!(city = %city, error = %e, "Geocoding request failed");
                return None;
            }
        };

        match response.json::<Vec<GeoLocation>>().await {
            Ok(mut locations) if !locations.is_empty() => Some(locations.remove(0)),
            Ok(_) => {
                tracing::debug!(city = %city, "Geocoding returned no match");
                None
            }
            Err(e) => {
                tracing::warn!(city = %city, error = %e, "Geocoding response malformed");
                None
            }
        }
    }

    async fn call_weather_api(&self, city: &str) -> AppResult<WeatherSnapshot> {
        let resolved = self.resolve_city(city).await;
        let url = format!("{}/weather", self.api_url);

        let mut request = self.http_client.get(&url).query(&[
            ("appid", self.api_key.as_str()),
            ("units", "metric"),
        ]);
        request = match &resolved {
            Some(location) => request.query(&[
                ("lat", location.lat.to_string()),
                ("lon", location.lon.to_string()),
            ]),
            None => request.query(&[("q", city)]),
        };

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                city = %city,
                status = %status,
                body = %body,
                "Weather API request failed"
            );
            return Err(AppError::WeatherApi(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        let api_response: ApiWeatherResponse = response.json().await?;

        let temp_swing = match self.fetch_temp_swing(city, resolved.as_ref()).await {
            Ok(swing) => swing,
            Err(e) => {
                tracing::warn!(city = %city, error = %e, "Forecast unavailable, assuming stable conditions");
                false
            }
        };

        let display_city = match &resolved {
            Some(location) if !location.country.is_empty() => {
                format!("{}, {}", location.name, location.country)
            }
            Some(location) => location.name.clone(),
            None => api_response.name.clone().unwrap_or_else(|| city.to_string()),
        };

        Ok(to_snapshot(display_city, api_response, temp_swing))
    }

    /// Checks the next 24 h of forecast for a large temperature spread.
    async fn fetch_temp_swing(&self, city: &str, resolved: Option<&GeoLocation>) -> AppResult<bool> {
        let url = format!("{}/forecast", self.api_url);
        let slot_count = FORECAST_SLOTS.to_string();

        let mut request = self.http_client.get(&url).query(&[
            ("appid", self.api_key.as_str()),
            ("units", "metric"),
            ("cnt", slot_count.as_str()),
        ]);
        request = match resolved {
            Some(location) => request.query(&[
                ("lat", location.lat.to_string()),
                ("lon", location.lon.to_string()),
            ]),
            None => request.query(&[("q", city)]),
        };

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(AppError::WeatherApi(format!(
                "Forecast API returned status {}",
                response.status()
            )));
        }

        let forecast: ApiForecastResponse = response.json().await?;
        let temps: Vec<f64> = forecast.list.iter().map(|slot| slot.main.temp).collect();

        Ok(temp_swing_from(&temps))
    }

    /// Canned conditions used when no API key is configured.
    fn mock_snapshot(&self, city: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            city: city.to_string(),
            description: "partly cloudy".to_string(),
            source: WeatherSource::Mock,
            reading: WeatherReading {
                temperature_c: 18.0,
                precipitation_mm: 0.0,
                wind_speed_kmh: 12.6,
                temp_swing: false,
            },
        }
    }
}

#[async_trait::async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, city: &str) -> AppResult<WeatherSnapshot> {
        if self.api_key.is_empty() {
            tracing::warn!(city = %city, "No weather API key configured, using mock conditions");
            return Ok(self.mock_snapshot(city));
        }

        let cache_key = CacheKey::CurrentWeather(city.to_string());
        if let Some(cache) = &self.cache {
            match cache.get::<WeatherSnapshot>(&cache_key).await {
                Ok(Some(snapshot)) => {
                    tracing::debug!(city = %city, "Weather cache hit");
                    return Ok(snapshot);
                }
                Ok(None) => tracing::debug!(city = %city, "Weather cache miss"),
                Err(e) => tracing::warn!(city = %city, error = %e, "Weather cache read failed"),
            }
        }

        let snapshot = self.call_weather_api(city).await?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.set(&cache_key, &snapshot, WEATHER_CACHE_TTL).await {
                tracing::warn!(city = %city, error = %e, "Weather cache write failed");
            }
        }

        tracing::info!(
            city = %snapshot.city,
            temperature_c = snapshot.reading.temperature_c,
            "Fetched current weather"
        );

        Ok(snapshot)
    }

    fn name(&self) -> &'static str {
        "openweathermap"
    }
}

fn to_snapshot(city: String, response: ApiWeatherResponse, temp_swing: bool) -> WeatherSnapshot {
    let description = response
        .weather
        .first()
        .map(|c| c.description.clone())
        .unwrap_or_default();

    WeatherSnapshot {
        city,
        description,
        source: WeatherSource::Live,
        reading: WeatherReading {
            temperature_c: response.main.temp,
            precipitation_mm: response.rain.unwrap_or_default().one_hour,
            wind_speed_kmh: response.wind.speed * MS_TO_KMH,
            temp_swing,
        },
    }
}

fn temp_swing_from(temps: &[f64]) -> bool {
    let max = temps.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min = temps.iter().cloned().fold(f64::INFINITY, f64::min);
    !temps.is_empty() && max - min >= TEMP_SWING_SPREAD_C
}
