//! Employee repository trait (port)

use async_trait::async_trait;
use hrm_shared::{Page, Pagination};
use uuid::Uuid;

use crate::domain::Employee;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Employee>, DomainError>;
    async fn find_by_user_id(&self, user_id: &Uuid) -> Result<Option<Employee>, DomainError>;
    async fn count_by_organization(&self, organization_id: &Uuid) -> Result<i64, DomainError>;
    async fn list(&self, organization_id: &Uuid, pagination: Pagination) -> Result<Page<Employee>, DomainError>;
    /// Fails with `EmployeeAlreadyExists` / `EmployeeCodeAlreadyExists` on
    /// unique violations.
    async fn create(&self, employee: &Employee) -> Result<Employee, DomainError>;
}
