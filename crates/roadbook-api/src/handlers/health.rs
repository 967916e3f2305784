//! Health check handler.

use axum::Json;
use axum::extract::State;

use roadbook_core::traits::store::CredentialStore;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health (no auth required)
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = match state.store.health_check().await {
        Ok(true) => "ok",
        _ => "degraded",
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        store: store.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
