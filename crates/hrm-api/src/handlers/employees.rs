//! Employee handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use hrm_core::Employee;

use crate::dto::employee::CreateEmployeeRequest;
use crate::dto::PaginationQuery;
use crate::error::ApiError;
use crate::extract::{ApiPath, ValidatedJson};
use crate::middleware::AuthUser;
use crate::response::{ApiResponse, PaginatedResponse};
use crate::state::AppState;

/// POST /api/v1/employees
pub async fn create_employee(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Employee>>), ApiError> {
    let employee = state.employees.create(&actor, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(employee))))
}

/// GET /api/v1/employees
pub async fn list_employees(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<Employee>>, ApiError> {
    let page = state.employees.list(&actor, query.pagination()).await?;
    Ok(Json(page.into()))
}

/// GET /api/v1/employees/{id}
pub async fn get_employee(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<Employee>>, ApiError> {
    let employee = state.employees.get(&actor, &id).await?;
    Ok(Json(ApiResponse::success(employee)))
}
