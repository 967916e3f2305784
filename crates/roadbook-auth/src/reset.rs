//! Password reset flow — one-time, hashed, time-boxed reset tokens.
//!
//! Only a peppered digest of the token is ever persisted; the plaintext
//! leaves the process exactly once, inside the reset email.

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::{debug, info};

use roadbook_core::config::auth::AuthConfig;
use roadbook_core::error::AppError;
use roadbook_core::result::AppResult;
use roadbook_core::traits::audit::AuditSink;
use roadbook_core::traits::mailer::Mailer;
use roadbook_core::traits::principal::PrincipalStore;

use crate::digest::sha256_hex;
use crate::password::{PasswordHasher, PasswordPolicy};

/// Issues and consumes password-reset tokens.
#[derive(Debug, Clone)]
pub struct ResetService {
    /// External principal store.
    principals: Arc<dyn PrincipalStore>,
    /// Password hasher for the replacement password.
    hasher: Arc<PasswordHasher>,
    /// Password policy applied before committing the new password.
    policy: Arc<PasswordPolicy>,
    /// Outbound email.
    mailer: Arc<dyn Mailer>,
    /// Best-effort audit trail.
    audit: Arc<dyn AuditSink>,
    /// Reset TTL and digest pepper.
    config: AuthConfig,
    /// Client-facing page the emailed link points at.
    reset_url_base: String,
}

impl ResetService {
    /// Creates a new reset service.
    pub fn new(
        principals: Arc<dyn PrincipalStore>,
        hasher: Arc<PasswordHasher>,
        policy: Arc<PasswordPolicy>,
        mailer: Arc<dyn Mailer>,
        audit: Arc<dyn AuditSink>,
        config: AuthConfig,
        reset_url_base: String,
    ) -> Self {
        Self {
            principals,
            hasher,
            policy,
            mailer,
            audit,
            config,
            reset_url_base,
        }
    }

    /// Issues a reset token for the account behind `email` and mails the
    /// reset link.
    ///
    /// An unknown email succeeds exactly like a known one, so the endpoint
    /// cannot be used to enumerate accounts. A mail transport failure does
    /// propagate, since the caller was promised an email.
    pub async fn request_reset(&self, email: &str, client_addr: &str) -> AppResult<()> {
        let principal = match self.principals.find_by_email(email).await? {
            Some(principal) => principal,
            None => {
                debug!("Password reset requested for unknown email");
                return Ok(());
            }
        };

        let token = generate_reset_token();
        let token_hash = self.digest(&token);
        let expires_at =
            Utc::now() + chrono::Duration::minutes(self.config.reset_ttl_minutes as i64);

        self.principals
            .save_reset_token(principal.id, &token_hash, expires_at)
            .await?;

        let link = format!("{}?token={}", self.reset_url_base, token);
        let text = format!(
            "Hello, {}. Use the following link to reset your password: {}",
            principal.name, link
        );
        let html = format!(
            "<p>Hello, <strong>{}</strong>. Use the link below to reset your password:</p>\
             <a href=\"{link}\" target=\"_blank\">{link}</a>",
            principal.name
        );

        self.mailer
            .send(
                &principal.email,
                "Reset your Roadbook password",
                &text,
                &html,
            )
            .await?;

        self.audit_best_effort(
            Some(principal.id),
            "password_reset_requested",
            "Reset link sent",
            client_addr,
        )
        .await;
        info!(principal_id = principal.id, "Password reset link sent");

        Ok(())
    }

    /// Validates a reset token and commits the new password.
    ///
    /// Matching the digest, replacing the password, and clearing the reset
    /// fields happen in one atomic store update, so the token is single-use
    /// even under concurrent calls.
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
        client_addr: &str,
    ) -> AppResult<()> {
        self.policy.validate(new_password)?;

        let token_hash = self.digest(token);
        let new_password_hash = self.hasher.hash_password(new_password)?;

        match self
            .principals
            .consume_reset_token(&token_hash, &new_password_hash)
            .await?
        {
            Some(principal) => {
                self.audit_best_effort(
                    Some(principal.id),
                    "password_reset",
                    "Password reset completed",
                    client_addr,
                )
                .await;
                info!(principal_id = principal.id, "Password reset completed");
                Ok(())
            }
            None => Err(AppError::invalid_reset_token()),
        }
    }

    fn digest(&self, token: &str) -> String {
        sha256_hex(&format!("{}{}", self.config.reset_token_pepper, token))
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
            tracing::warn!(action, error = %e, "Audit record failed");
        }
    }
}

/// 32 random bytes, hex encoded.
fn generate_reset_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_tokens_are_unique() {
        let first = generate_reset_token();
        let second = generate_reset_token();
        assert_eq!(first.len(), 64);
        assert_ne!(first, second);
    }
}
