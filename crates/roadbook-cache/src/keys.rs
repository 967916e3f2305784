//! Store key builders for all Roadbook credential entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the service uses. The three credential namespaces
//! are independent and only ever meet in this module.

/// Key holding the digest of a principal's live refresh token.
pub fn refresh_token(principal_id: i64) -> String {
    format!("refresh:{principal_id}")
}

/// Key marking an access token as revoked before its natural expiry.
pub fn blacklist(token_digest: &str) -> String {
    format!("blacklist:{token_digest}")
}

/// Key marking a client address as blocked by the login throttle.
pub fn blocked(address: &str) -> String {
    format!("blocked:{address}")
}

/// Key counting failed logins from a client address inside the window.
pub fn login_failures(address: &str) -> String {
    format!("failures:{address}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_key() {
        assert_eq!(refresh_token(42), "refresh:42");
    }

    #[test]
    fn test_throttle_keys() {
        assert_eq!(blocked("1.2.3.4"), "blocked:1.2.3.4");
        assert_eq!(login_failures("1.2.3.4"), "failures:1.2.3.4");
    }

    #[test]
    fn test_blacklist_key() {
        assert_eq!(blacklist("abc123"), "blacklist:abc123");
    }
}
