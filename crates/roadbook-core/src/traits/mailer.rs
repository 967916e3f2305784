//! Outbound email trait.

use async_trait::async_trait;

use crate::result::AppResult;

/// Email dispatch collaborator.
///
/// The reset flow treats delivery as fire-and-forget except that a failure
/// must propagate to the caller of the reset request.
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug + 'static {
    /// Send a single message with both plaintext and HTML bodies.
    async fn send(
        &self,
        to_address: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> AppResult<()>;
}
