//! PostgreSQL repository implementations

pub mod organization_repo_impl;
pub mod user_repo_impl;
pub mod employee_repo_impl;
pub mod invoice_repo_impl;
pub mod email_template_repo_impl;

pub use organization_repo_impl::PgOrganizationRepository;
pub use user_repo_impl::PgUserRepository;
pub use employee_repo_impl::PgEmployeeRepository;
pub use invoice_repo_impl::PgInvoiceRepository;
pub use email_template_repo_impl::PgEmailTemplateRepository;

use hrm_core::error::DomainError;
use tracing::error;

/// Name of the violated unique constraint, if `e` is a unique violation.
pub(crate) fn unique_violation(e: &sqlx::Error) -> Option<String> {
    e.as_database_error()
        .filter(|db| db.is_unique_violation())
        .map(|db| db.constraint().unwrap_or_default().to_string())
}

/// Logs and wraps a driver error.
pub(crate) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}
