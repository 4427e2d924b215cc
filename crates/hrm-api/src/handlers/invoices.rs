// ============================================================================
// HRM API - Invoice Handlers
// File: crates/hrm-api/src/handlers/invoices.rs
// ============================================================================
//! Invoice CRUD, settlement, PDF download and email dispatch

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use hrm_core::{Invoice, InvoiceStatus};
use hrm_shared::Pagination;

use crate::dto::invoice::{
    CreateInvoiceRequest, ListInvoicesQuery, SendInvoiceRequest, UpdateInvoiceRequest,
    UpdateStatusRequest,
};
use crate::dto::PaginationQuery;
use crate::error::ApiError;
use crate::extract::{ApiPath, ValidatedJson};
use crate::middleware::AuthUser;
use crate::response::{ApiResponse, PaginatedResponse};
use crate::state::AppState;

/// POST /api/v1/invoices
pub async fn create_invoice(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Invoice>>), ApiError> {
    let invoice = state.invoices.create(&actor, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(invoice))))
}

/// GET /api/v1/invoices?status=&page=&limit=
pub async fn list_invoices(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Query(query): Query<ListInvoicesQuery>,
) -> Result<Json<PaginatedResponse<Invoice>>, ApiError> {
    let status = parse_status_filter(query.status.as_deref())?;
    let page = state
        .invoices
        .list(&actor, status, list_pagination(&query))
        .await?;
    Ok(Json(page.into()))
}

/// GET /api/v1/invoices/{id}
pub async fn get_invoice(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<Invoice>>, ApiError> {
    let invoice = state.invoices.get(&actor, &id).await?;
    Ok(Json(ApiResponse::success(invoice)))
}

/// PUT /api/v1/invoices/{id}
pub async fn update_invoice(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateInvoiceRequest>,
) -> Result<Json<ApiResponse<Invoice>>, ApiError> {
    let invoice = state.invoices.update(&actor, &id, payload.into()).await?;
    Ok(Json(ApiResponse::success(invoice)))
}

/// DELETE /api/v1/invoices/{id}
pub async fn delete_invoice(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.invoices.delete(&actor, &id).await?;
    Ok(Json(ApiResponse::message("Invoice deleted successfully")))
}

/// PATCH /api/v1/invoices/{id}/status
pub async fn update_invoice_status(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<Invoice>>, ApiError> {
    let invoice = state
        .invoices
        .update_status(&actor, &id, payload.status)
        .await?;
    Ok(Json(ApiResponse::success(invoice)))
}

/// GET /api/v1/invoices/{id}/pdf
pub async fn download_invoice_pdf(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, ApiError> {
    let document = state.delivery.render_pdf(&actor, &id).await?;
    let disposition = format!("attachment; filename={}", document.filename);

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.content,
    )
        .into_response())
}

/// POST /api/v1/invoices/{id}/send
///
/// The body is optional; `{"templateId": "..."}` picks a template other than
/// the organization default.
pub async fn send_invoice(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    body: Bytes,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let request = parse_send_request(&body)?;
    state
        .delivery
        .send_invoice(&actor, &id, request.template_id)
        .await?;
    Ok(Json(ApiResponse::message("Invoice sent successfully")))
}

fn parse_status_filter(raw: Option<&str>) -> Result<Option<InvoiceStatus>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => InvoiceStatus::from_str(value)
            .map(Some)
            .ok_or_else(|| ApiError::BadRequest(format!("Unknown invoice status '{}'", value))),
    }
}

fn list_pagination(query: &ListInvoicesQuery) -> Pagination {
    PaginationQuery {
        page: query.page.clone(),
        limit: query.limit.clone(),
    }
    .pagination()
}

fn parse_send_request(body: &[u8]) -> Result<SendInvoiceRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(SendInvoiceRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))
}
