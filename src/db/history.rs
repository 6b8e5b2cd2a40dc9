use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Row, SqlitePool,
};

use crate::error::{AppError, AppResult};

/// Durable record of when each catalog item was last recommended.
///
/// Keyed by the garment's stable identifier. Reads happen once at the start
/// of a recommendation request, writes once at the end, so implementations
/// need no intra-request consistency beyond that.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Full snapshot for batch diversity lookups
    async fn load_all(&self) -> AppResult<HashMap<String, DateTime<Utc>>>;

    /// Last-recommended timestamp for one item, if any
    async fn get(&self, item_id: &str) -> AppResult<Option<DateTime<Utc>>>;

    /// Records a recommendation. Timestamps are monotonic per item: a put
    /// with an older timestamp than the stored one is a no-op.
    async fn put(&self, item_id: &str, worn_at: DateTime<Utc>) -> AppResult<()>;
}

/// SQLite-backed history store.
///
/// Timestamps are stored as RFC 3339 text in UTC, which makes the
/// monotonicity guard a plain string comparison in SQL.
pub struct SqliteHistoryStore {
    pool: SqlitePool,
}

impl SqliteHistoryStore {
    /// Opens (and creates, if missing) the history database at the given URL.
    pub async fn connect(url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS wear_history (
                item_id TEXT PRIMARY KEY,
                last_worn TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

fn encode_timestamp(worn_at: DateTime<Utc>) -> String {
    worn_at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| AppError::Internal(format!("Corrupt history timestamp '{}': {}", raw, e)))
}

#[async_trait]
impl HistoryStore for SqliteHistoryStore {
    async fn load_all(&self) -> AppResult<HashMap<String, DateTime<Utc>>> {
        let rows = sqlx::query("SELECT item_id, last_worn FROM wear_history")
            .fetch_all(&self.pool)
            .await?;

        let mut history = HashMap::with_capacity(rows.len());
        for row in rows {
            let item_id: String = row.get(0);
            let last_worn: String = row.get(1);
            history.insert(item_id, decode_timestamp(&last_worn)?);
        }

        Ok(history)
    }

    async fn get(&self, item_id: &str) -> AppResult<Option<DateTime<Utc>>> {
        let row = sqlx::query("SELECT last_worn FROM wear_history WHERE item_id = ?1")
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let last_worn: String = row.get(0);
                Ok(Some(decode_timestamp(&last_worn)?))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, item_id: &str, worn_at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO wear_history (item_id, last_worn) VALUES (?1, ?2)
            ON CONFLICT(item_id) DO UPDATE SET last_worn = excluded.last_worn
            WHERE excluded.last_worn > wear_history.last_worn
            "#,
        )
        .bind(item_id)
        .bind(encode_timestamp(worn_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    async fn memory_store() -> SqliteHistoryStore {
        SqliteHistoryStore::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_get_absent_item_returns_none() {
        let store = memory_store().await;
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_then_get_round_trips() {
        let store = memory_store().await;
        let now = Utc::now();

        store.put("img_001", now).await.unwrap();

        let stored = store.get("img_001").await.unwrap().unwrap();
        assert!((stored - now).num_microseconds().unwrap().abs() < 2);
    }

    #[tokio::test]
    async fn test_load_all_returns_every_entry() {
        let store = memory_store().await;
        let now = Utc::now();

        store.put("img_001", now).await.unwrap();
        store.put("img_002", now - Duration::hours(3)).await.unwrap();

        let all = store.load_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.contains_key("img_001"));
        assert!(all.contains_key("img_002"));
    }

    #[tokio::test]
    async fn test_newer_put_overwrites() {
        let store = memory_store().await;
        let earlier = Utc::now() - Duration::hours(5);
        let later = Utc::now();

        store.put("img_001", earlier).await.unwrap();
        store.put("img_001", later).await.unwrap();

        let stored = store.get("img_001").await.unwrap().unwrap();
        assert!(stored > earlier + Duration::hours(4));
    }

    #[tokio::test]
    async fn test_older_put_never_rewinds_the_timestamp() {
        let store = memory_store().await;
        let earlier = Utc::now() - Duration::hours(5);
        let later = Utc::now();

        store.put("img_001", later).await.unwrap();
        store.put("img_001", earlier).await.unwrap();

        let stored = store.get("img_001").await.unwrap().unwrap();
        assert!((stored - later).num_microseconds().unwrap().abs() < 2);
    }
}
