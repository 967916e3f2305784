//! The principal model — the one entity type the auth core reads and writes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered application user, as stored by the external principal store.
///
/// The `id` is an opaque integer assigned by the store. The reset-token
/// fields hold only the peppered digest of an outstanding reset token and
/// its absolute expiry; the plaintext token is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Principal {
    /// Unique principal identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address, unique per principal.
    pub email: String,
    /// Argon2id password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Digest of the outstanding password-reset token, if any.
    #[serde(skip_serializing)]
    pub reset_token_hash: Option<String>,
    /// Absolute expiry of the outstanding reset token.
    #[serde(skip_serializing)]
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    /// When the principal was created.
    pub created_at: DateTime<Utc>,
    /// When the principal was last updated.
    pub updated_at: DateTime<Utc>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Data required to create a new principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPrincipal {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
}

/// The public, serializable view of a principal returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrincipalSummary {
    /// Unique principal identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// When the principal was created.
    pub created_at: DateTime<Utc>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<&Principal> for PrincipalSummary {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id,
            name: principal.name.clone(),
            email: principal.email.clone(),
            created_at: principal.created_at,
            last_login_at: principal.last_login_at,
        }
    }
}

impl Principal {
    /// Whether an unexpired reset token is outstanding for this principal.
    pub fn has_live_reset_token(&self) -> bool {
        match (&self.reset_token_hash, self.reset_token_expires_at) {
            (Some(_), Some(expires_at)) => Utc::now() < expires_at,
            _ => false,
        }
    }
}
