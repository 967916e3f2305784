//! # roadbook-core
//!
//! Core crate for the Roadbook authentication service. Contains the
//! collaborator traits, configuration schemas, the `Principal` model,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other Roadbook crates.

pub mod config;
pub mod error;
pub mod principal;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
