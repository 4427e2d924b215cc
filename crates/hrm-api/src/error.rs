//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use validator::{ValidationErrors, ValidationErrorsKind};

use hrm_core::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed: {message}")]
    Validation { message: String, errors: Vec<FieldError> },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, errors) = match self {
            ApiError::Validation { message, errors } => {
                warn!("Validation failed: {} field error(s)", errors.len());
                (message, (!errors.is_empty()).then_some(errors))
            }
            ApiError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                (msg, None)
            }
            ApiError::Unauthorized(msg) => {
                warn!("Unauthorized: {}", msg);
                (msg, None)
            }
            ApiError::Forbidden(msg) => {
                warn!("Forbidden: {}", msg);
                (msg, None)
            }
            ApiError::NotFound(msg) => {
                warn!("Not found: {}", msg);
                (msg, None)
            }
            ApiError::Conflict(msg) => {
                warn!("Conflict: {}", msg);
                (msg, None)
            }
            ApiError::InternalError(msg) => {
                error!("Internal error: {}", msg);
                (msg, None)
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            message,
            errors,
        });

        (status, body).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        use DomainError::*;

        let message = err.to_string();
        match err {
            ValidationError(_) => ApiError::Validation { message, errors: Vec::new() },

            PaidInvoiceImmutable(_) | InvalidStatusTransition { .. } | DefaultTemplateDeletion => {
                ApiError::BadRequest(message)
            }

            InvoiceNotFound | TemplateNotFound | DefaultTemplateNotFound | OrganizationNotFound
            | EmployeeNotFound | UserNotFound => ApiError::NotFound(message),

            Forbidden(_) | FeatureNotAvailable(_) | EmployeeLimitReached(_) => ApiError::Forbidden(message),

            InvoiceNumberAlreadyExists(_) | EmailAlreadyExists(_) | EmployeeAlreadyExists(_)
            | EmployeeCodeAlreadyExists(_) => ApiError::Conflict(message),

            InvalidCredentials | UserNotActive | InvalidToken(_) => ApiError::Unauthorized(message),

            RenderFailed(_) | TransportFailed(_) | DispatchNotRecorded(_) => ApiError::InternalError(message),

            DatabaseError(_) | PasswordHashError(_) | TokenGenerationError(_) | InternalError(_) => {
                error!("{}", message);
                ApiError::InternalError("Internal server error".to_string())
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation {
            message: "Validation failed".to_string(),
            errors: flatten_validation_errors(&errors),
        }
    }
}

/// Flattens nested validator output into `{field, message}` pairs with paths
/// like `client.email` or `items[0].quantity`, sorted by path.
pub fn flatten_validation_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect(errors, "", &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                out.extend(list.iter().map(|e| FieldError {
                    field: path.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", e.code)),
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}
