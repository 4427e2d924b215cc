//! Email template repository trait (port)

use async_trait::async_trait;
use hrm_shared::{Page, Pagination};
use uuid::Uuid;

use crate::domain::EmailTemplate;
use crate::error::DomainError;

/// Implementations keep at most one default per organization: persisting a
/// template with `is_default = true` clears the flag on every other template
/// of the same organization within the same transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailTemplateRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<EmailTemplate>, DomainError>;
    async fn find_default(&self, organization_id: &Uuid) -> Result<Option<EmailTemplate>, DomainError>;
    async fn list(&self, organization_id: &Uuid, pagination: Pagination) -> Result<Page<EmailTemplate>, DomainError>;
    async fn create(&self, template: &EmailTemplate) -> Result<EmailTemplate, DomainError>;
    async fn update(&self, template: &EmailTemplate) -> Result<EmailTemplate, DomainError>;
    /// Deletes the template only while it is not the default. Returns whether
    /// a row was removed.
    async fn delete(&self, id: &Uuid, organization_id: &Uuid) -> Result<bool, DomainError>;
}
