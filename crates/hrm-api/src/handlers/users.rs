//! User handlers

use axum::{extract::State, http::StatusCode, Json};

use hrm_core::services::UserInfo;

use crate::dto::user::CreateUserRequest;
use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::middleware::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserInfo>>), ApiError> {
    let user = state.users.create_user(&actor, payload.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserInfo::from(&user))),
    ))
}
