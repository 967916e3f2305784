//! # roadbook-api
//!
//! HTTP layer for the Roadbook authentication service: the router, request
//! handlers, DTOs, the bearer-token extractor, error-to-status mapping,
//! and the concrete mailer implementations.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod mail;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use state::AppState;
