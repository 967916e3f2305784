//! Store manager that dispatches to the configured provider and bounds
//! every operation with the configured timeout.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use roadbook_core::config::cache::CacheConfig;
use roadbook_core::error::AppError;
use roadbook_core::result::AppResult;
use roadbook_core::traits::store::CredentialStore;

/// Store manager that wraps the configured credential store provider.
///
/// The provider is selected at construction time based on configuration.
/// Every call is bounded by the configured operation timeout; an elapsed
/// timeout is reported as a store failure and is never mistaken for an
/// absent key.
#[derive(Debug, Clone)]
pub struct StoreManager {
    /// The inner store provider.
    inner: Arc<dyn CredentialStore>,
    /// Upper bound applied to each single operation.
    op_timeout: Duration,
}

impl StoreManager {
    /// Create a new store manager from configuration.
    pub async fn new(config: &CacheConfig) -> AppResult<Self> {
        let inner: Arc<dyn CredentialStore> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("Initializing Redis credential store");
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                Arc::new(crate::redis::RedisStore::new(client))
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory credential store");
                Arc::new(crate::memory::MemoryStore::new(&config.memory))
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown store provider: '{other}'. Supported: memory, redis"
                )));
            }
        };

        Ok(Self {
            inner,
            op_timeout: Duration::from_millis(config.op_timeout_ms),
        })
    }

    /// Create a store manager from an existing provider (for testing).
    pub fn from_store(store: Arc<dyn CredentialStore>, op_timeout: Duration) -> Self {
        Self {
            inner: store,
            op_timeout,
        }
    }

    async fn bounded<T, F>(&self, op: &str, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>> + Send,
    {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(AppError::store_unavailable(format!(
                "Store operation '{op}' timed out after {}ms",
                self.op_timeout.as_millis()
            ))),
        }
    }
}

#[async_trait]
impl CredentialStore for StoreManager {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.bounded("get", self.inner.get(key)).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.bounded("set", self.inner.set(key, value, ttl)).await
    }

    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        self.bounded("set_nx", self.inner.set_nx(key, value, ttl))
            .await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.bounded("delete", self.inner.delete(key)).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.bounded("exists", self.inner.exists(key)).await
    }

    async fn incr(&self, key: &str) -> AppResult<i64> {
        self.bounded("incr", self.inner.incr(key)).await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        self.bounded("expire", self.inner.expire(key, ttl)).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.bounded("health_check", self.inner.health_check()).await
    }
}

#[cfg(all(test, feature = "memory"))]
mod tests {
    use super::*;
    use roadbook_core::error::ErrorKind;

    /// A store whose every call hangs, for exercising the timeout path.
    #[derive(Debug)]
    struct StalledStore;

    #[async_trait]
    impl CredentialStore for StalledStore {
        async fn get(&self, _key: &str) -> AppResult<Option<String>> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<()> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        }

        async fn set_nx(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<bool> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(false)
        }

        async fn delete(&self, _key: &str) -> AppResult<()> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        }

        async fn exists(&self, _key: &str) -> AppResult<bool> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(false)
        }

        async fn incr(&self, _key: &str) -> AppResult<i64> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(0)
        }

        async fn expire(&self, _key: &str, _ttl: Duration) -> AppResult<bool> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(false)
        }

        async fn health_check(&self) -> AppResult<bool> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_timeout_maps_to_store_unavailable() {
        let manager =
            StoreManager::from_store(Arc::new(StalledStore), Duration::from_millis(20));
        let err = manager.get("anything").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::StoreUnavailable);
    }

    #[tokio::test]
    async fn test_fast_backend_passes_through() {
        let config = roadbook_core::config::cache::MemoryCacheConfig { max_capacity: 100 };
        let store = Arc::new(crate::memory::MemoryStore::new(&config));
        let manager = StoreManager::from_store(store, Duration::from_secs(1));

        manager
            .set("k", "v", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(manager.get("k").await.unwrap(), Some("v".to_string()));
    }
}
