//! # roadbook-database
//!
//! PostgreSQL adapters for Roadbook Auth: the connection pool, migrations,
//! and the concrete [`PrincipalStore`](roadbook_core::traits::PrincipalStore)
//! and [`AuditSink`](roadbook_core::traits::AuditSink) implementations.

pub mod connection;
pub mod migration;
pub mod repositories;
