//! Email template handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use hrm_core::EmailTemplate;

use crate::dto::email_template::{CreateTemplateRequest, UpdateTemplateRequest};
use crate::dto::PaginationQuery;
use crate::error::ApiError;
use crate::extract::{ApiPath, ValidatedJson};
use crate::middleware::AuthUser;
use crate::response::{ApiResponse, PaginatedResponse};
use crate::state::AppState;

/// POST /api/v1/email-templates
pub async fn create_template(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EmailTemplate>>), ApiError> {
    let template = state.templates.create(&actor, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(template))))
}

/// GET /api/v1/email-templates
pub async fn list_templates(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<EmailTemplate>>, ApiError> {
    let page = state.templates.list(&actor, query.pagination()).await?;
    Ok(Json(page.into()))
}

/// GET /api/v1/email-templates/{id}
pub async fn get_template(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<EmailTemplate>>, ApiError> {
    let template = state.templates.get(&actor, &id).await?;
    Ok(Json(ApiResponse::success(template)))
}

/// PUT /api/v1/email-templates/{id}
pub async fn update_template(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateTemplateRequest>,
) -> Result<Json<ApiResponse<EmailTemplate>>, ApiError> {
    let template = state.templates.update(&actor, &id, payload.into()).await?;
    Ok(Json(ApiResponse::success(template)))
}

/// DELETE /api/v1/email-templates/{id}
pub async fn delete_template(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.templates.delete(&actor, &id).await?;
    Ok(Json(ApiResponse::message("Template deleted successfully")))
}
