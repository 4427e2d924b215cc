//! Organization repository trait (port)

use async_trait::async_trait;
use hrm_shared::{Page, Pagination};
use uuid::Uuid;

use crate::domain::Organization;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Organization>, DomainError>;
    async fn list(&self, pagination: Pagination) -> Result<Page<Organization>, DomainError>;
    async fn create(&self, organization: &Organization) -> Result<Organization, DomainError>;
    async fn update(&self, organization: &Organization) -> Result<Organization, DomainError>;
}
