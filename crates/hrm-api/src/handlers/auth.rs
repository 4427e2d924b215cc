// ============================================================================
// HRM API - Auth Handlers
// File: crates/hrm-api/src/handlers/auth.rs
// ============================================================================
//! Authentication HTTP handlers (login, refresh)

use axum::{extract::State, Json};

use crate::dto::auth::{AuthResponse, LoginRequest, RefreshRequest};
use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Login handler - POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    let result = state.auth.login(&payload.email, &payload.password).await?;
    Ok(Json(ApiResponse::success_with_message(
        AuthResponse::from(result),
        "Login successful",
    )))
}

/// Refresh handler - POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    let result = state.auth.refresh(&payload.refresh_token).await?;
    Ok(Json(ApiResponse::success(AuthResponse::from(result))))
}
