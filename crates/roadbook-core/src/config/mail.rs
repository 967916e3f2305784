//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// Mail transport selection and sender identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Mail provider: `"log"` (development) or `"sendgrid"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// SendGrid API key. Required when the provider is `"sendgrid"`.
    #[serde(default)]
    pub sendgrid_api_key: String,
    /// Sender address for outbound mail.
    #[serde(default = "default_from")]
    pub from_address: String,
    /// Base URL of the client-facing reset page; the reset token is appended
    /// as a query parameter.
    #[serde(default = "default_reset_url")]
    pub reset_url_base: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            sendgrid_api_key: String::new(),
            from_address: default_from(),
            reset_url_base: default_reset_url(),
        }
    }
}

fn default_provider() -> String {
    "log".to_string()
}

fn default_from() -> String {
    "no-reply@roadbook.app".to_string()
}

fn default_reset_url() -> String {
    "https://app.roadbook.app/reset-password".to_string()
}
