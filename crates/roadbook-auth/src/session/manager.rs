//! Session lifecycle manager — login, refresh, logout, and the
//! verification step every protected request passes through.
//!
//! A session is governed by its refresh token: it begins at login and ends
//! at logout or refresh-token expiry. Access-token validity is a nested
//! timer inside that window and does not change session state.
//!
//! The manager holds no mutable state between calls. Two concurrent logins
//! for the same principal race at the store; last write wins, making the
//! most recent login the single active session.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{info, warn};

use roadbook_cache::{StoreManager, keys};
use roadbook_core::config::auth::AuthConfig;
use roadbook_core::error::AppError;
use roadbook_core::principal::PrincipalSummary;
use roadbook_core::result::AppResult;
use roadbook_core::traits::audit::AuditSink;
use roadbook_core::traits::principal::PrincipalStore;
use roadbook_core::traits::store::CredentialStore;

use crate::digest::sha256_hex;
use crate::password::PasswordHasher;
use crate::throttle::LoginThrottle;
use crate::token::{Claims, IssuedToken, TokenIssuer, TokenVerifier, VerifyError};

/// Result of a successful login.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LoginOutcome {
    /// The authenticated principal.
    pub principal: PrincipalSummary,
    /// Short-lived signed access token.
    pub access_token: IssuedToken,
    /// Opaque refresh token. Handed to the client once, stored only as a digest.
    pub refresh_token: String,
    /// When the refresh token expires.
    pub refresh_expires_at: DateTime<Utc>,
}

/// Result of a successful token refresh.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RefreshOutcome {
    /// New access token.
    pub access_token: IssuedToken,
    /// Rotated refresh token replacing the one just used.
    pub refresh_token: String,
    /// When the rotated refresh token expires.
    pub refresh_expires_at: DateTime<Utc>,
}

/// Manages the complete session lifecycle.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// Access token signer.
    issuer: Arc<TokenIssuer>,
    /// Access token verifier.
    verifier: Arc<TokenVerifier>,
    /// External principal store.
    principals: Arc<dyn PrincipalStore>,
    /// Credential store for refresh digests and the denylist.
    store: Arc<StoreManager>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Login throttle.
    throttle: Arc<LoginThrottle>,
    /// Best-effort audit trail.
    audit: Arc<dyn AuditSink>,
    /// Token lifetimes.
    config: AuthConfig,
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        issuer: Arc<TokenIssuer>,
        verifier: Arc<TokenVerifier>,
        principals: Arc<dyn PrincipalStore>,
        store: Arc<StoreManager>,
        hasher: Arc<PasswordHasher>,
        throttle: Arc<LoginThrottle>,
        audit: Arc<dyn AuditSink>,
        config: AuthConfig,
    ) -> Self {
        Self {
            issuer,
            verifier,
            principals,
            store,
            hasher,
            throttle,
            audit,
            config,
        }
    }

    /// Performs the complete login flow:
    ///
    /// 1. Throttle check — a blocked address fails before any credential
    ///    is touched
    /// 2. Principal lookup by email
    /// 3. Password verification
    /// 4. Token pair issuance; the refresh digest overwrites any prior one
    ///
    /// A missing principal and a wrong password produce the same error.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        client_addr: &str,
    ) -> AppResult<LoginOutcome> {
        if self.throttle.is_blocked(client_addr).await? {
            return Err(AppError::rate_limited(
                "Too many login attempts. Try again later.",
            ));
        }

        let principal = match self.principals.find_by_email(email).await? {
            Some(principal) => principal,
            None => {
                self.throttle.record_failure(client_addr).await?;
                self.audit_best_effort(None, "login_failed", "Credential mismatch", client_addr)
                    .await;
                return Err(AppError::invalid_credentials());
            }
        };

        if !self
            .hasher
            .verify_password(password, &principal.password_hash)?
        {
            self.throttle.record_failure(client_addr).await?;
            self.audit_best_effort(
                Some(principal.id),
                "login_failed",
                "Credential mismatch",
                client_addr,
            )
            .await;
            return Err(AppError::invalid_credentials());
        }

        self.throttle.record_success(client_addr).await?;

        let access_token = self.issuer.issue(principal.id, self.access_ttl())?;
        let (refresh_token, refresh_expires_at) = self.issue_refresh_token(principal.id).await?;

        if let Err(e) = self
            .principals
            .update_last_login(principal.id, Utc::now())
            .await
        {
            warn!(principal_id = principal.id, error = %e, "Failed to update last login");
        }

        self.audit_best_effort(Some(principal.id), "login", "Successful login", client_addr)
            .await;
        info!(principal_id = principal.id, addr = client_addr, "Login successful");

        Ok(LoginOutcome {
            principal: PrincipalSummary::from(&principal),
            access_token,
            refresh_token,
            refresh_expires_at,
        })
    }

    /// Exchanges a valid refresh token for a new access token.
    ///
    /// The refresh token is rotated on every use: the digest in the store is
    /// replaced and the token just presented stops working.
    pub async fn refresh(
        &self,
        refresh_token: &str,
        client_addr: &str,
    ) -> AppResult<RefreshOutcome> {
        let principal_id = parse_refresh_principal(refresh_token)
            .ok_or_else(|| AppError::invalid_refresh_token("Refresh token not recognized"))?;

        let stored = self
            .store
            .get(&keys::refresh_token(principal_id))
            .await?
            .ok_or_else(|| AppError::invalid_refresh_token("Refresh token not recognized"))?;

        if stored != sha256_hex(refresh_token) {
            return Err(AppError::invalid_refresh_token(
                "Refresh token not recognized",
            ));
        }

        let principal = self
            .principals
            .find_by_id(principal_id)
            .await?
            .ok_or_else(|| AppError::invalid_refresh_token("Refresh token not recognized"))?;

        let access_token = self.issuer.issue(principal.id, self.access_ttl())?;
        let (new_refresh, refresh_expires_at) = self.issue_refresh_token(principal.id).await?;

        self.audit_best_effort(Some(principal.id), "token_refresh", "Token refreshed", client_addr)
            .await;
        info!(principal_id = principal.id, "Token refreshed");

        Ok(RefreshOutcome {
            access_token,
            refresh_token: new_refresh,
            refresh_expires_at,
        })
    }

    /// Ends a session. Idempotent: both steps succeed when there is nothing
    /// left to remove.
    ///
    /// 1. Delete the refresh entry, but only if the presented token matches
    ///    the stored digest — a fabricated token cannot end someone else's
    ///    session
    /// 2. Denylist the access token for its remaining natural lifetime, so
    ///    it cannot be replayed while still cryptographically valid
    pub async fn logout(
        &self,
        access_token: &str,
        refresh_token: &str,
        client_addr: &str,
    ) -> AppResult<()> {
        if let Some(principal_id) = parse_refresh_principal(refresh_token) {
            let key = keys::refresh_token(principal_id);
            if let Some(stored) = self.store.get(&key).await? {
                if stored == sha256_hex(refresh_token) {
                    self.store.delete(&key).await?;
                }
            }
        }

        match self.verifier.verify(access_token) {
            Ok(claims) => {
                let remaining = claims.remaining_ttl();
                if !remaining.is_zero() {
                    self.store
                        .set(
                            &keys::blacklist(&sha256_hex(access_token)),
                            "revoked",
                            remaining,
                        )
                        .await?;
                }
                self.audit_best_effort(Some(claims.sub), "logout", "Logged out", client_addr)
                    .await;
                info!(principal_id = claims.sub, "Logout completed");
            }
            Err(_) => {
                // An expired or unusable token has nothing left to revoke.
                self.audit_best_effort(None, "logout", "Logged out", client_addr)
                    .await;
            }
        }

        Ok(())
    }

    /// Verification step for every protected request: signature, expiry,
    /// then the denylist. Fails closed — a store outage is an error, not
    /// an absent denylist entry.
    pub async fn verify_request(&self, access_token: &str) -> AppResult<Claims> {
        let claims = match self.verifier.verify(access_token) {
            Ok(claims) => claims,
            Err(VerifyError::Expired) => {
                return Err(AppError::token_expired("Token expired. Log in again."));
            }
            Err(VerifyError::Malformed | VerifyError::BadSignature) => {
                return Err(AppError::unauthenticated("Invalid token"));
            }
        };

        let denylisted = self
            .store
            .exists(&keys::blacklist(&sha256_hex(access_token)))
            .await?;
        if denylisted {
            return Err(AppError::token_revoked("Token has been revoked"));
        }

        Ok(claims)
    }

    /// Generates a fresh refresh token and stores its digest, overwriting
    /// any previous one for this principal.
    async fn issue_refresh_token(&self, principal_id: i64) -> AppResult<(String, DateTime<Utc>)> {
        let refresh_token = generate_refresh_token(principal_id);
        let ttl = self.refresh_ttl();
        let expires_at = Utc::now()
            + chrono::Duration::from_std(ttl)
                .map_err(|e| AppError::internal(format!("Refresh TTL out of range: {e}")))?;

        self.store
            .set(
                &keys::refresh_token(principal_id),
                &sha256_hex(&refresh_token),
                ttl,
            )
            .await?;

        Ok((refresh_token, expires_at))
    }

    async fn audit_best_effort(
        &self,
        principal_id: Option<i64>,
        action: &str,
        detail: &str,
        client_addr: &str,
    ) {
        if let Err(e) = self
            .audit
            .record(principal_id, action, detail, client_addr)
            .await
        {
            warn!(action, error = %e, "Audit record failed");
        }
    }

    fn access_ttl(&self) -> Duration {
        Duration::from_secs(self.config.access_ttl_minutes * 60)
    }

    fn refresh_ttl(&self) -> Duration {
        Duration::from_secs(self.config.refresh_ttl_days * 24 * 60 * 60)
    }
}

/// Builds an opaque refresh token: the owning principal's id followed by
/// 32 random bytes, hex encoded. The id prefix lets `refresh` find the
/// stored digest without a reverse index.
fn generate_refresh_token(principal_id: i64) -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    format!("{principal_id}.{}", hex::encode(bytes))
}

/// Extracts the claimed principal id from a refresh token.
fn parse_refresh_principal(refresh_token: &str) -> Option<i64> {
    let (id, secret) = refresh_token.split_once('.')?;
    if secret.is_empty() {
        return None;
    }
    id.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_token_shape() {
        let token = generate_refresh_token(42);
        assert!(token.starts_with("42."));
        assert_eq!(token.len(), "42.".len() + 64);
        assert_eq!(parse_refresh_principal(&token), Some(42));
    }

    #[test]
    fn test_parse_rejects_junk() {
        assert_eq!(parse_refresh_principal("no-separator"), None);
        assert_eq!(parse_refresh_principal("abc.def"), None);
        assert_eq!(parse_refresh_principal("42."), None);
    }
}
