//! Password policy enforcement for new passwords.

use roadbook_core::config::auth::AuthConfig;
use roadbook_core::error::AppError;
use roadbook_core::result::AppResult;

/// Validates new passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    /// Minimum password length.
    min_length: usize,
}

impl PasswordPolicy {
    /// Creates a new policy from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validates a candidate password.
    pub fn validate(&self, password: &str) -> AppResult<()> {
        if password.chars().count() < self.min_length {
            return Err(AppError::weak_password(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadbook_core::error::ErrorKind;

    fn policy() -> PasswordPolicy {
        PasswordPolicy { min_length: 8 }
    }

    #[test]
    fn test_short_password_rejected() {
        let err = policy().validate("short").unwrap_err();
        assert_eq!(err.kind, ErrorKind::WeakPassword);
    }

    #[test]
    fn test_minimum_length_accepted() {
        assert!(policy().validate("newpass123").is_ok());
        assert!(policy().validate("exactly8").is_ok());
    }
}
