//! Unified application error types for Roadbook.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Infrastructure failures (database,
//! credential store, mail transport) are wrapped here before they cross
//! the core boundary; callers never see raw driver errors.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Email/password pair did not match a principal. Deliberately does not
    /// distinguish "no such principal" from "wrong password".
    InvalidCredentials,
    /// The client address is currently blocked by the login throttle.
    RateLimited,
    /// No usable credential was presented (missing/malformed header or token).
    Unauthenticated,
    /// The access token's signature is valid but its expiry has passed.
    TokenExpired,
    /// The access token was revoked before its natural expiry.
    TokenRevoked,
    /// The refresh token is absent, expired, or does not match the stored one.
    InvalidRefreshToken,
    /// The password-reset token is absent, expired, or already consumed.
    InvalidResetToken,
    /// A new password failed the password policy.
    WeakPassword,
    /// The principal does not exist. Internal only; never surfaced from the
    /// reset-request path.
    PrincipalNotFound,
    /// A credential-store operation failed or timed out. The only kind a
    /// caller may retry.
    StoreUnavailable,
    /// Outbound email delivery failed.
    EmailDelivery,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate email, concurrent modification).
    Conflict,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::RateLimited => write!(f, "RATE_LIMITED"),
            Self::Unauthenticated => write!(f, "UNAUTHENTICATED"),
            Self::TokenExpired => write!(f, "TOKEN_EXPIRED"),
            Self::TokenRevoked => write!(f, "TOKEN_REVOKED"),
            Self::InvalidRefreshToken => write!(f, "INVALID_REFRESH_TOKEN"),
            Self::InvalidResetToken => write!(f, "INVALID_RESET_TOKEN"),
            Self::WeakPassword => write!(f, "WEAK_PASSWORD"),
            Self::PrincipalNotFound => write!(f, "PRINCIPAL_NOT_FOUND"),
            Self::StoreUnavailable => write!(f, "STORE_UNAVAILABLE"),
            Self::EmailDelivery => write!(f, "EMAIL_DELIVERY"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Roadbook.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid-credentials error with the single generic message.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, "Invalid email or password")
    }

    /// Create a rate-limited error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimited, message)
    }

    /// Create an unauthenticated error.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message)
    }

    /// Create a token-expired error.
    pub fn token_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenExpired, message)
    }

    /// Create a token-revoked error.
    pub fn token_revoked(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenRevoked, message)
    }

    /// Create an invalid-refresh-token error.
    pub fn invalid_refresh_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRefreshToken, message)
    }

    /// Create an invalid-reset-token error.
    pub fn invalid_reset_token() -> Self {
        Self::new(ErrorKind::InvalidResetToken, "Invalid or expired token")
    }

    /// Create a weak-password error.
    pub fn weak_password(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::WeakPassword, message)
    }

    /// Create a principal-not-found error.
    pub fn principal_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PrincipalNotFound, message)
    }

    /// Create a store-unavailable error.
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StoreUnavailable, message)
    }

    /// Create an email-delivery error.
    pub fn email_delivery(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EmailDelivery, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_credentials_message_is_generic() {
        let err = AppError::invalid_credentials();
        assert_eq!(err.kind, ErrorKind::InvalidCredentials);
        assert!(!err.message.to_lowercase().contains("principal"));
        assert!(!err.message.to_lowercase().contains("not found"));
    }

    #[test]
    fn display_includes_kind_code() {
        let err = AppError::token_expired("Token has expired");
        assert_eq!(err.to_string(), "TOKEN_EXPIRED: Token has expired");
    }
}
