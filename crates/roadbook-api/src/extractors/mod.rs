//! Request extractors.

pub mod auth;
pub mod client_addr;

pub use auth::AuthPrincipal;
pub use client_addr::ClientAddr;
