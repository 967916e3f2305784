//! Token and password configuration.

use serde::{Deserialize, Serialize};

/// Signing keys, token lifetimes, and the password policy.
///
/// Access tokens are signed with the RSA **private** key, which only the
/// issuing process needs; any process holding the **public** key can verify.
/// A verifier-only deployment leaves `private_key_pem` unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// RSA public key (PEM) used to verify access tokens.
    pub public_key_pem: String,
    /// RSA private key (PEM) used to sign access tokens. Optional so that
    /// verifying replicas never have to hold the signing secret.
    #[serde(default)]
    pub private_key_pem: Option<String>,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: u64,
    /// Password-reset token TTL in minutes.
    #[serde(default = "default_reset_ttl")]
    pub reset_ttl_minutes: u64,
    /// Server-side pepper mixed into reset-token digests.
    #[serde(default)]
    pub reset_token_pepper: String,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

fn default_access_ttl() -> u64 {
    60
}

fn default_refresh_ttl() -> u64 {
    7
}

fn default_reset_ttl() -> u64 {
    60
}

fn default_password_min() -> usize {
    8
}
