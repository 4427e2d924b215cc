//! Organization handlers (platform administration)

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use hrm_core::Organization;

use crate::dto::organization::{CreateOrganizationRequest, UpdateSubscriptionRequest};
use crate::dto::PaginationQuery;
use crate::error::ApiError;
use crate::extract::{ApiPath, ValidatedJson};
use crate::middleware::AuthUser;
use crate::response::{ApiResponse, PaginatedResponse};
use crate::state::AppState;

/// POST /api/v1/organizations
pub async fn create_organization(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateOrganizationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Organization>>), ApiError> {
    let plan = payload.plan();
    let organization = state
        .organizations
        .create(&actor, payload.name, plan)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(organization))))
}

/// GET /api/v1/organizations
pub async fn list_organizations(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<Organization>>, ApiError> {
    let page = state.organizations.list(&actor, query.pagination()).await?;
    Ok(Json(page.into()))
}

/// GET /api/v1/organizations/{id}
pub async fn get_organization(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<Organization>>, ApiError> {
    let organization = state.organizations.get(&actor, &id).await?;
    Ok(Json(ApiResponse::success(organization)))
}

/// PUT /api/v1/organizations/{id}/subscription
pub async fn update_subscription(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateSubscriptionRequest>,
) -> Result<Json<ApiResponse<Organization>>, ApiError> {
    let organization = state
        .organizations
        .update_subscription(&actor, &id, payload.plan())
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        organization,
        "Subscription updated",
    )))
}
