pub mod cache;
pub mod history;

pub use cache::{create_redis_client, Cache, CacheKey};
pub use history::{HistoryStore, SqliteHistoryStore};

#[cfg(test)]
pub use history::MockHistoryStore;
