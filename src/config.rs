use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// OpenWeatherMap API key (empty disables live weather lookups)
    #[serde(default)]
    pub weather_api_key: String,

    /// OpenWeatherMap API base URL
    #[serde(default = "default_weather_api_url")]
    pub weather_api_url: String,

    /// OpenWeatherMap geocoding API base URL
    #[serde(default = "default_geocoding_api_url")]
    pub geocoding_api_url: String,

    /// SQLite URL for the recommendation history store
    #[serde(default = "default_history_url")]
    pub history_url: String,

    /// Redis connection URL for the weather cache (empty disables caching)
    #[serde(default)]
    pub redis_url: String,

    /// Path to the wardrobe catalog JSON file
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Style preference score applied uniformly to every garment.
    /// 5.0 is neutral and leaves rankings untouched; per-user values
    /// can replace it without changing the scorer's contract.
    #[serde(default = "default_style_score")]
    pub style_score: f64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_weather_api_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_geocoding_api_url() -> String {
    "https://api.openweathermap.org/geo/1.0".to_string()
}

fn default_history_url() -> String {
    "sqlite://data/wear_history.db".to_string()
}

fn default_catalog_path() -> String {
    "data/wardrobe.json".to_string()
}

fn default_style_score() -> f64 {
    5.0
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
