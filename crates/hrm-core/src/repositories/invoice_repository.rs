//! Invoice repository trait (port)

use async_trait::async_trait;
use hrm_shared::{Page, Pagination};
use uuid::Uuid;

use crate::domain::{Invoice, InvoiceStatus};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Invoice>, DomainError>;

    async fn list(
        &self,
        organization_id: &Uuid,
        status: Option<InvoiceStatus>,
        pagination: Pagination,
    ) -> Result<Page<Invoice>, DomainError>;

    /// Fails with `InvoiceNumberAlreadyExists` when the number is taken
    /// within the organization.
    async fn create(&self, invoice: &Invoice) -> Result<Invoice, DomainError>;

    /// Writes the invoice only if the stored row is not Paid. `None` means
    /// the row was paid (or removed) since it was read.
    async fn update(&self, invoice: &Invoice) -> Result<Option<Invoice>, DomainError>;

    /// Deletes the invoice only if it is not Paid. Returns whether a row was
    /// removed.
    async fn delete(&self, id: &Uuid, organization_id: &Uuid) -> Result<bool, DomainError>;
}
