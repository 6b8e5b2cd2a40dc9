use std::fmt::Display;

use redis::{AsyncCommands, Client};

use crate::error::{AppError, AppResult};

/// Keys for cached weather lookups
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    CurrentWeather(String),
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::CurrentWeather(city) => write!(f, "weather:{}", city.to_lowercase()),
        }
    }
}

/// Creates a Redis client for caching
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Read-through cache over Redis for weather snapshots.
///
/// Callers treat failures as cache misses; a broken cache must never take
/// down a lookup that the live API could still serve.
#[derive(Clone)]
pub struct Cache {
    redis_client: Client,
}

impl Cache {
    pub fn new(redis_client: Client) -> Self {
        Self { redis_client }
    }

    /// Retrieves and deserializes a cached value, `None` on miss.
    pub async fn get<T: serde::de::DeserializeOwned>(
        &self,
        key: &CacheKey,
    ) -> AppResult<Option<T>> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let cached: Option<String> = conn.get(key.to_string()).await?;

        match cached {
            Some(json) => {
                let value = serde_json::from_str(&json).map_err(|e| {
                    AppError::Internal(format!("Cache deserialization error: {}", e))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Serializes and stores a value with the given TTL in seconds.
    pub async fn set<T: serde::Serialize>(
        &self,
        key: &CacheKey,
        value: &T,
        ttl: u64,
    ) -> AppResult<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::Internal(format!("Cache serialization error: {}", e)))?;

        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let _: () = conn.set_ex(key.to_string(), json, ttl).await?;

        tracing::debug!(key = %key, ttl = ttl, "Cached value");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_display_lowercases_city() {
        let key = CacheKey::CurrentWeather("Seoul".to_string());
        assert_eq!(key.to_string(), "weather:seoul");
    }

    #[test]
    fn test_cache_key_display_preserves_spaces() {
        let key = CacheKey::CurrentWeather("New York".to_string());
        assert_eq!(key.to_string(), "weather:new york");
    }
}
