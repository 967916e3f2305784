//! Login throttle — per-address failure counting and IP blocking.
//!
//! The counter uses a fixed window, not a sliding log: the first failure
//! stamps the window TTL and later failures only increment. Reaching the
//! threshold writes an explicit block key that is independent of the
//! counter. The block is written with SET NX, so an attacker retrying
//! while blocked can never extend it.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use roadbook_cache::{StoreManager, keys};
use roadbook_core::config::throttle::ThrottleConfig;
use roadbook_core::result::AppResult;
use roadbook_core::traits::store::CredentialStore;

/// Tracks failed logins per client address and blocks repeat offenders.
#[derive(Debug, Clone)]
pub struct LoginThrottle {
    /// Credential store holding counters and block markers.
    store: Arc<StoreManager>,
    /// Threshold, window, and block duration.
    config: ThrottleConfig,
}

impl LoginThrottle {
    /// Creates a new throttle.
    pub fn new(store: Arc<StoreManager>, config: ThrottleConfig) -> Self {
        Self { store, config }
    }

    /// Whether the address is currently blocked. Consulted before any
    /// credential is touched; presence of the block key is decisive
    /// regardless of the counter state.
    pub async fn is_blocked(&self, address: &str) -> AppResult<bool> {
        self.store.exists(&keys::blocked(address)).await
    }

    /// Records one failed login attempt from the address.
    pub async fn record_failure(&self, address: &str) -> AppResult<()> {
        let counter_key = keys::login_failures(address);
        let count = self.store.incr(&counter_key).await?;

        if count == 1 {
            self.store
                .expire(&counter_key, Duration::from_secs(self.config.window_seconds))
                .await?;
        }

        if count >= i64::from(self.config.max_failures) {
            let newly_blocked = self
                .store
                .set_nx(
                    &keys::blocked(address),
                    "blocked",
                    Duration::from_secs(self.config.block_seconds),
                )
                .await?;
            if newly_blocked {
                warn!(
                    address,
                    failures = count,
                    block_seconds = self.config.block_seconds,
                    "Address blocked after repeated login failures"
                );
            }
        }

        Ok(())
    }

    /// Clears the failure counter after a successful login. The block key,
    /// if present, is left untouched: its expiry is absolute.
    pub async fn record_success(&self, address: &str) -> AppResult<()> {
        self.store.delete(&keys::login_failures(address)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadbook_cache::memory::MemoryStore;
    use roadbook_core::config::cache::MemoryCacheConfig;

    fn make_throttle() -> LoginThrottle {
        let store = Arc::new(MemoryStore::new(&MemoryCacheConfig { max_capacity: 1000 }));
        let manager = Arc::new(StoreManager::from_store(store, Duration::from_secs(1)));
        LoginThrottle::new(
            manager,
            ThrottleConfig {
                max_failures: 5,
                window_seconds: 900,
                block_seconds: 900,
            },
        )
    }

    #[tokio::test]
    async fn test_not_blocked_below_threshold() {
        let throttle = make_throttle();
        for _ in 0..4 {
            throttle.record_failure("10.0.0.1").await.unwrap();
        }
        assert!(!throttle.is_blocked("10.0.0.1").await.unwrap());
    }

    #[tokio::test]
    async fn test_blocked_at_threshold() {
        let throttle = make_throttle();
        for _ in 0..5 {
            throttle.record_failure("10.0.0.2").await.unwrap();
        }
        assert!(throttle.is_blocked("10.0.0.2").await.unwrap());
    }

    #[tokio::test]
    async fn test_addresses_are_independent() {
        let throttle = make_throttle();
        for _ in 0..5 {
            throttle.record_failure("10.0.0.3").await.unwrap();
        }
        assert!(throttle.is_blocked("10.0.0.3").await.unwrap());
        assert!(!throttle.is_blocked("10.0.0.4").await.unwrap());
    }

    #[tokio::test]
    async fn test_success_clears_counter_not_block() {
        let throttle = make_throttle();
        for _ in 0..5 {
            throttle.record_failure("10.0.0.5").await.unwrap();
        }
        throttle.record_success("10.0.0.5").await.unwrap();
        // The block key has an absolute expiry and survives the counter reset.
        assert!(throttle.is_blocked("10.0.0.5").await.unwrap());
    }
}
