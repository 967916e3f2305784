//! Auth handlers — login, refresh, logout.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use validator::Validate;

use roadbook_core::error::AppError;

use crate::dto::request::{LoginRequest, LogoutRequest, RefreshRequest};
use crate::dto::response::{LoginResponse, MessageResponse, TokenResponse};
use crate::error::ApiError;
use crate::extractors::ClientAddr;
use crate::extractors::auth::bearer_token;
use crate::state::AppState;

/// POST /api/users/login
pub async fn login(
    State(state): State<AppState>,
    ClientAddr(addr): ClientAddr,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outcome = state
        .session_manager
        .login(&req.email, &req.password, &addr)
        .await?;

    Ok(Json(LoginResponse {
        principal: outcome.principal,
        access_token: outcome.access_token.token,
        access_expires_at: outcome.access_token.expires_at,
        refresh_token: outcome.refresh_token,
        refresh_expires_at: outcome.refresh_expires_at,
    }))
}

/// POST /api/users/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ClientAddr(addr): ClientAddr,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let outcome = state
        .session_manager
        .refresh(&req.refresh_token, &addr)
        .await?;

    Ok(Json(TokenResponse {
        access_token: outcome.access_token.token,
        access_expires_at: outcome.access_token.expires_at,
        refresh_token: outcome.refresh_token,
        refresh_expires_at: outcome.refresh_expires_at,
    }))
}

/// POST /api/users/logout
///
/// Reads the raw bearer token instead of going through the verification
/// extractor: a second logout with an already-revoked token must succeed.
pub async fn logout(
    State(state): State<AppState>,
    ClientAddr(addr): ClientAddr,
    headers: HeaderMap,
    Json(req): Json<LogoutRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let access_token = bearer_token(&headers)?;

    state
        .session_manager
        .logout(access_token, &req.refresh_token, &addr)
        .await?;

    Ok(Json(MessageResponse {
        message: "Logged out successfully.".to_string(),
    }))
}
