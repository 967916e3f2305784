//! `AuthPrincipal` extractor — pulls the bearer token from the
//! Authorization header and runs the full verification step.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;

use roadbook_auth::token::Claims;
use roadbook_core::error::AppError;
use roadbook_core::result::AppResult;

use crate::error::ApiError;
use crate::state::AppState;

/// Verified claims of the caller, available to protected handlers.
///
/// Extraction fails with `Unauthenticated` before any core logic runs when
/// the header is missing or not of the form `Bearer <token>`; a present
/// token then goes through signature, expiry, and denylist checks.
#[derive(Debug, Clone)]
pub struct AuthPrincipal(pub Claims);

impl AuthPrincipal {
    /// Returns the authenticated principal's ID.
    pub fn principal_id(&self) -> i64 {
        self.0.principal_id()
    }
}

impl FromRequestParts<AppState> for AuthPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let claims = state.session_manager.verify_request(token).await?;
        Ok(AuthPrincipal(claims))
    }
}

/// Extracts the raw bearer token from an Authorization header.
///
/// Used directly by the logout handler, which must accept a token that the
/// full verification step would reject (logout is idempotent even for an
/// already-revoked token).
pub fn bearer_token(headers: &HeaderMap) -> AppResult<&str> {
    let header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthenticated("Missing Authorization header"))?;

    header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthenticated("Invalid Authorization header format"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use roadbook_core::error::ErrorKind;

    #[test]
    fn test_missing_header_is_unauthenticated() {
        let headers = HeaderMap::new();
        let err = bearer_token(&headers).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }

    #[test]
    fn test_malformed_header_is_unauthenticated() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic abc"));
        let err = bearer_token(&headers).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }

    #[test]
    fn test_bearer_token_extracted() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer tok123"));
        assert_eq!(bearer_token(&headers).unwrap(), "tok123");
    }
}
