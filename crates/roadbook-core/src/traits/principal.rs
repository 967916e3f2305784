//! Principal store trait — the only seam through which the auth core
//! touches durable user records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::principal::{NewPrincipal, Principal};
use crate::result::AppResult;

/// Accessor for the external principal store.
///
/// The auth core never issues queries itself; everything it needs from the
/// user table goes through this trait, which keeps the dependency narrow
/// and swappable.
#[async_trait]
pub trait PrincipalStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a principal by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Principal>>;

    /// Find a principal by primary key.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Principal>>;

    /// Create a new principal. Fails with a conflict if the email is taken.
    async fn create(&self, data: &NewPrincipal) -> AppResult<Principal>;

    /// Store the digest and expiry of a freshly issued reset token,
    /// replacing any outstanding one.
    async fn save_reset_token(
        &self,
        id: i64,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Atomically match an unexpired reset-token digest, set the new
    /// password hash, and clear the reset fields, all in one update.
    ///
    /// Returns the updated principal, or `None` when no row matched —
    /// either the digest is unknown, the token expired, or a concurrent
    /// call already consumed it.
    async fn consume_reset_token(
        &self,
        token_hash: &str,
        new_password_hash: &str,
    ) -> AppResult<Option<Principal>>;

    /// Record a successful login.
    async fn update_last_login(&self, id: i64, at: DateTime<Utc>) -> AppResult<()>;
}
