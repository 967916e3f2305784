//! Claims embedded in every access token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access token payload. Tamper-evident: any mutation of these fields
/// invalidates the signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the principal ID.
    pub sub: i64,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Random token ID so two tokens issued within the same second for the
    /// same principal never collide.
    pub jti: String,
}

impl Claims {
    /// Returns the principal ID from the subject claim.
    pub fn principal_id(&self) -> i64 {
        self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Returns the remaining natural lifetime (zero if already expired).
    pub fn remaining_ttl(&self) -> std::time::Duration {
        let remaining = self.exp - Utc::now().timestamp();
        if remaining > 0 {
            std::time::Duration::from_secs(remaining as u64)
        } else {
            std::time::Duration::ZERO
        }
    }
}
