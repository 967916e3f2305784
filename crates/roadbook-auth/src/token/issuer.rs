//! Access token creation, signed with the RSA private key.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use rand::Rng;

use roadbook_core::config::auth::AuthConfig;
use roadbook_core::error::AppError;
use roadbook_core::result::AppResult;

use super::claims::Claims;

/// A freshly signed access token together with its expiry instant.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IssuedToken {
    /// The signed, encoded token.
    pub token: String,
    /// When the token naturally expires.
    pub expires_at: DateTime<Utc>,
}

/// Creates signed access tokens. Only the issuing process constructs one of
/// these; verifying replicas hold a [`TokenVerifier`](super::TokenVerifier)
/// instead and never see the private key.
#[derive(Clone)]
pub struct TokenIssuer {
    /// RSA private key for signing.
    encoding_key: EncodingKey,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer").finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Creates a new issuer from auth configuration.
    ///
    /// Fails when `private_key_pem` is unset (a verifier-only process) or
    /// does not parse as an RSA private key.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        let pem = config.private_key_pem.as_deref().ok_or_else(|| {
            AppError::configuration("auth.private_key_pem is required for an issuing process")
        })?;

        let encoding_key = EncodingKey::from_rsa_pem(pem.as_bytes()).map_err(|e| {
            AppError::configuration(format!("Invalid RSA private key: {e}"))
        })?;

        Ok(Self { encoding_key })
    }

    /// Signs a new access token for the given principal with the given TTL.
    pub fn issue(&self, principal_id: i64, ttl: Duration) -> AppResult<IssuedToken> {
        let now = Utc::now();
        let expires_at = now
            + chrono::Duration::from_std(ttl)
                .map_err(|e| AppError::internal(format!("Token TTL out of range: {e}")))?;

        let mut jti_bytes = [0u8; 8];
        rand::rng().fill_bytes(&mut jti_bytes);

        let claims = Claims {
            sub: principal_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: hex::encode(jti_bytes),
        };

        let token = encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }
}
