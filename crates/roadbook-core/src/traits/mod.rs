//! Core traits defined in `roadbook-core` and implemented by other crates.

pub mod audit;
pub mod mailer;
pub mod principal;
pub mod store;

pub use audit::AuditSink;
pub use mailer::Mailer;
pub use principal::PrincipalStore;
pub use store::CredentialStore;
