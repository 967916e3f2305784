//! Account handlers — registration and profile.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use validator::Validate;

use roadbook_core::error::AppError;
use roadbook_core::principal::{NewPrincipal, PrincipalSummary};
use roadbook_core::traits::principal::PrincipalStore;

use crate::dto::request::RegisterRequest;
use crate::dto::response::RegisterResponse;
use crate::error::ApiError;
use crate::extractors::AuthPrincipal;
use crate::state::AppState;

/// POST /api/users/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    state.password_policy.validate(&req.password)?;

    let password_hash = state.password_hasher.hash_password(&req.password)?;
    let principal = state
        .principals
        .create(&NewPrincipal {
            name: req.name,
            email: req.email,
            password_hash,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Account created successfully.".to_string(),
            principal: PrincipalSummary::from(&principal),
        }),
    ))
}

/// GET /api/users/profile (protected)
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthPrincipal,
) -> Result<Json<PrincipalSummary>, ApiError> {
    let principal = state
        .principals
        .find_by_id(auth.principal_id())
        .await?
        .ok_or_else(|| AppError::principal_not_found("Account no longer exists"))?;

    Ok(Json(PrincipalSummary::from(&principal)))
}
