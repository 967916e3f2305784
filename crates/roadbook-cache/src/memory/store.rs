//! In-memory credential store using the moka crate.
//!
//! Counter keys (for the login throttle) live in a separate dashmap so
//! increments are atomic; value keys carry their own TTL through a moka
//! expiry policy.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;

use roadbook_core::config::cache::MemoryCacheConfig;
use roadbook_core::result::AppResult;
use roadbook_core::traits::store::CredentialStore;

/// A cached value together with the TTL it was stored under.
#[derive(Debug, Clone)]
struct StoredValue {
    value: String,
    ttl: Duration,
}

/// Per-entry expiry policy: every entry lives exactly as long as the TTL
/// it was inserted (or last updated) with.
struct PerEntryTtl;

impl Expiry<String, StoredValue> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredValue,
        _updated_at: Instant,
        _remaining: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// A throttle counter with an optional absolute deadline.
#[derive(Debug)]
struct CounterEntry {
    value: i64,
    deadline: Option<Instant>,
}

impl CounterEntry {
    fn is_expired(&self) -> bool {
        matches!(self.deadline, Some(deadline) if Instant::now() >= deadline)
    }
}

/// In-memory credential store provider.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    /// Value entries with per-entry TTL.
    cache: Cache<String, StoredValue>,
    /// Counter entries, kept separate for atomic increments.
    counters: std::sync::Arc<dashmap::DashMap<String, CounterEntry>>,
}

impl MemoryStore {
    /// Create a new in-memory store from configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self {
            cache,
            counters: std::sync::Arc::new(dashmap::DashMap::new()),
        }
    }

    fn live_counter(&self, key: &str) -> Option<i64> {
        let entry = self.counters.get(key)?;
        if entry.is_expired() { None } else { Some(entry.value) }
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        if let Some(count) = self.live_counter(key) {
            return Ok(Some(count.to_string()));
        }
        Ok(self.cache.get(key).await.map(|stored| stored.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.cache
            .insert(
                key.to_string(),
                StoredValue {
                    value: value.to_string(),
                    ttl,
                },
            )
            .await;
        Ok(())
    }

    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        // moka has no native set-if-not-exists; get-then-insert is close
        // enough for a single-node in-memory backend.
        if self.cache.get(key).await.is_some() {
            return Ok(false);
        }
        self.set(key, value, ttl).await?;
        Ok(true)
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.remove(key).await;
        self.counters.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        if self.live_counter(key).is_some() {
            return Ok(true);
        }
        Ok(self.cache.get(key).await.is_some())
    }

    async fn incr(&self, key: &str) -> AppResult<i64> {
        let mut entry = self.counters.entry(key.to_string()).or_insert(CounterEntry {
            value: 0,
            deadline: None,
        });
        if entry.is_expired() {
            entry.value = 0;
            entry.deadline = None;
        }
        entry.value += 1;
        Ok(entry.value)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        if let Some(mut entry) = self.counters.get_mut(key) {
            if !entry.is_expired() {
                entry.deadline = Some(Instant::now() + ttl);
                return Ok(true);
            }
        }
        if let Some(stored) = self.cache.get(key).await {
            self.cache
                .insert(
                    key.to_string(),
                    StoredValue {
                        value: stored.value,
                        ttl,
                    },
                )
                .await;
            return Ok(true);
        }
        Ok(false)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_store() -> MemoryStore {
        MemoryStore::new(&MemoryCacheConfig { max_capacity: 1000 })
    }

    #[tokio::test]
    async fn test_set_get() {
        let store = make_store();
        store
            .set("key1", "value1", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(
            store.get("key1").await.unwrap(),
            Some("value1".to_string())
        );
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = make_store();
        store
            .set("key2", "value2", Duration::from_secs(60))
            .await
            .unwrap();
        store.delete("key2").await.unwrap();
        assert_eq!(store.get("key2").await.unwrap(), None);
        // Deleting again is not an error.
        store.delete("key2").await.unwrap();
    }

    #[tokio::test]
    async fn test_per_entry_ttl_expires() {
        let store = make_store();
        store
            .set("short", "v", Duration::from_millis(30))
            .await
            .unwrap();
        store
            .set("long", "v", Duration::from_secs(60))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(80)).await;

        assert_eq!(store.get("short").await.unwrap(), None);
        assert_eq!(store.get("long").await.unwrap(), Some("v".to_string()));
    }

    #[tokio::test]
    async fn test_incr_and_window_expiry() {
        let store = make_store();
        assert_eq!(store.incr("counter").await.unwrap(), 1);
        assert_eq!(store.incr("counter").await.unwrap(), 2);

        assert!(
            store
                .expire("counter", Duration::from_millis(30))
                .await
                .unwrap()
        );
        tokio::time::sleep(Duration::from_millis(80)).await;

        // Expired window: the next increment starts a fresh count.
        assert_eq!(store.incr("counter").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_set_nx() {
        let store = make_store();
        assert!(
            store
                .set_nx("nx_key", "first", Duration::from_secs(60))
                .await
                .unwrap()
        );
        assert!(
            !store
                .set_nx("nx_key", "second", Duration::from_secs(60))
                .await
                .unwrap()
        );
        assert_eq!(
            store.get("nx_key").await.unwrap(),
            Some("first".to_string())
        );
    }

    #[tokio::test]
    async fn test_expire_absent_key() {
        let store = make_store();
        assert!(
            !store
                .expire("missing", Duration::from_secs(60))
                .await
                .unwrap()
        );
    }
}
