//! Concrete mailer implementations behind the [`Mailer`] trait.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use roadbook_core::config::mail::MailConfig;
use roadbook_core::error::AppError;
use roadbook_core::result::AppResult;
use roadbook_core::traits::mailer::Mailer;

/// Build the configured mailer.
pub fn build_mailer(config: &MailConfig) -> AppResult<Arc<dyn Mailer>> {
    match config.provider.as_str() {
        "sendgrid" => {
            if config.sendgrid_api_key.is_empty() {
                return Err(AppError::configuration(
                    "mail.sendgrid_api_key is required when the provider is 'sendgrid'",
                ));
            }
            Ok(Arc::new(SendGridMailer::new(
                config.sendgrid_api_key.clone(),
                config.from_address.clone(),
            )))
        }
        "log" => Ok(Arc::new(LogMailer)),
        other => Err(AppError::configuration(format!(
            "Unknown mail provider: '{other}'. Supported: log, sendgrid"
        ))),
    }
}

/// Sends mail through the SendGrid v3 HTTP API.
#[derive(Debug, Clone)]
pub struct SendGridMailer {
    http: reqwest::Client,
    api_key: String,
    from_address: String,
}

impl SendGridMailer {
    const ENDPOINT: &'static str = "https://api.sendgrid.com/v3/mail/send";

    /// Creates a new SendGrid mailer.
    pub fn new(api_key: String, from_address: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            from_address,
        }
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn send(
        &self,
        to_address: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> AppResult<()> {
        let payload = serde_json::json!({
            "personalizations": [{ "to": [{ "email": to_address }] }],
            "from": { "email": self.from_address },
            "subject": subject,
            "content": [
                { "type": "text/plain", "value": text_body },
                { "type": "text/html", "value": html_body },
            ],
        });

        let response = self
            .http
            .post(Self::ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    roadbook_core::error::ErrorKind::EmailDelivery,
                    "Failed to reach the mail provider",
                    e,
                )
            })?;

        if !response.status().is_success() {
            return Err(AppError::email_delivery(format!(
                "Mail provider returned status {}",
                response.status()
            )));
        }

        info!(to = to_address, "Email dispatched");
        Ok(())
    }
}

/// Development mailer that logs instead of sending. Bodies carry reset
/// links, so only the envelope is logged.
#[derive(Debug, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(
        &self,
        to_address: &str,
        subject: &str,
        _text_body: &str,
        _html_body: &str,
    ) -> AppResult<()> {
        info!(to = to_address, subject, "email send stub");
        Ok(())
    }
}
