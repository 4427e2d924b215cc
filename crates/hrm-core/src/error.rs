//! Domain errors

use hrm_security::PasswordError;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{InvoiceStatus, MutationKind};

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found")]
    UserNotFound,

    #[error("User not active")]
    UserNotActive,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Organization not found")]
    OrganizationNotFound,

    #[error("Module '{0}' is not available for this organization")]
    FeatureNotAvailable(String),

    #[error("Employee not found")]
    EmployeeNotFound,

    #[error("Employee record already exists for user {0}")]
    EmployeeAlreadyExists(Uuid),

    #[error("Employee code already exists: {0}")]
    EmployeeCodeAlreadyExists(String),

    #[error("Employee limit of {0} reached for the current plan")]
    EmployeeLimitReached(i32),

    #[error("Invoice not found")]
    InvoiceNotFound,

    #[error("Invoice number already exists: {0}")]
    InvoiceNumberAlreadyExists(String),

    #[error("Cannot {0} a paid invoice")]
    PaidInvoiceImmutable(MutationKind),

    #[error("Invoice cannot move from {from} to {to}")]
    InvalidStatusTransition { from: InvoiceStatus, to: InvoiceStatus },

    #[error("Email template not found")]
    TemplateNotFound,

    #[error("No default email template configured")]
    DefaultTemplateNotFound,

    #[error("Cannot delete the default template. Set another template as default first")]
    DefaultTemplateDeletion,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Document rendering failed: {0}")]
    RenderFailed(String),

    #[error("Email delivery failed: {0}")]
    TransportFailed(String),

    #[error("Invoice email was sent but its status could not be recorded: {0}")]
    DispatchNotRecorded(String),

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<PasswordError> for DomainError {
    fn from(e: PasswordError) -> Self {
        DomainError::PasswordHashError(e.to_string())
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paid_invoice_messages() {
        assert_eq!(
            DomainError::PaidInvoiceImmutable(MutationKind::Update).to_string(),
            "Cannot update a paid invoice"
        );
        assert_eq!(
            DomainError::PaidInvoiceImmutable(MutationKind::Delete).to_string(),
            "Cannot delete a paid invoice"
        );
    }

    #[test]
    fn test_transition_message() {
        let err = DomainError::InvalidStatusTransition {
            from: InvoiceStatus::Paid,
            to: InvoiceStatus::Sent,
        };
        assert_eq!(err.to_string(), "Invoice cannot move from Paid to Sent");
    }

    #[test]
    fn test_password_errors_map_to_hash_error() {
        let err = DomainError::from(PasswordError::MalformedHash("bad salt".to_string()));
        assert!(matches!(err, DomainError::PasswordHashError(ref msg) if msg.contains("bad salt")));
    }
}
