//! Concrete store adapters backed by PostgreSQL.

pub mod audit;
pub mod principal;

pub use audit::PgAuditSink;
pub use principal::PgPrincipalStore;
