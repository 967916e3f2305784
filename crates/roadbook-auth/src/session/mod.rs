//! Session lifecycle — login, refresh, logout, request verification.

pub mod manager;

pub use manager::{LoginOutcome, RefreshOutcome, SessionManager};
