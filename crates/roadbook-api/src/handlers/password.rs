//! Password reset handlers.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use roadbook_core::error::AppError;

use crate::dto::request::{RequestPasswordResetRequest, ResetPasswordRequest};
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::ClientAddr;
use crate::state::AppState;

/// POST /api/users/request-password-reset
///
/// Responds identically whether or not the email is registered.
pub async fn request_password_reset(
    State(state): State<AppState>,
    ClientAddr(addr): ClientAddr,
    Json(req): Json<RequestPasswordResetRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state.reset_service.request_reset(&req.email, &addr).await?;

    Ok(Json(MessageResponse {
        message: "If the email is registered, a password reset link has been sent.".to_string(),
    }))
}

/// POST /api/users/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    ClientAddr(addr): ClientAddr,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .reset_service
        .reset_password(&req.token, &req.new_password, &addr)
        .await?;

    Ok(Json(MessageResponse {
        message: "Password reset successfully.".to_string(),
    }))
}
