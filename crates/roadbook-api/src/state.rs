//! Application state shared across all handlers.

use std::sync::Arc;

use roadbook_auth::password::{PasswordHasher, PasswordPolicy};
use roadbook_auth::reset::ResetService;
use roadbook_auth::session::SessionManager;
use roadbook_cache::StoreManager;
use roadbook_core::config::AppConfig;
use roadbook_core::traits::principal::PrincipalStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Credential store (Redis or in-memory).
    pub store: Arc<StoreManager>,
    /// External principal store.
    pub principals: Arc<dyn PrincipalStore>,
    /// Session lifecycle manager.
    pub session_manager: Arc<SessionManager>,
    /// Password reset flow.
    pub reset_service: Arc<ResetService>,
    /// Password hasher (Argon2).
    pub password_hasher: Arc<PasswordHasher>,
    /// Password policy.
    pub password_policy: Arc<PasswordPolicy>,
}
