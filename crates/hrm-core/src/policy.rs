// ============================================================================
// HRM Core - Authorization Policy
// File: crates/hrm-core/src/policy.rs
// ============================================================================
//! Single capability check shared by every service.

use uuid::Uuid;

use crate::domain::Role;
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ReadInvoice,
    WriteInvoice,
    DeleteInvoice,
    SendInvoice,
    ReadTemplate,
    WriteTemplate,
    DeleteTemplate,
    ReadEmployees,
    WriteEmployees,
    ManageUsers,
    ViewOrganization,
    ManageOrganizations,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::ReadInvoice => "read invoices",
            Action::WriteInvoice => "write invoices",
            Action::DeleteInvoice => "delete invoices",
            Action::SendInvoice => "send invoices",
            Action::ReadTemplate => "read email templates",
            Action::WriteTemplate => "write email templates",
            Action::DeleteTemplate => "delete email templates",
            Action::ReadEmployees => "read employees",
            Action::WriteEmployees => "write employees",
            Action::ManageUsers => "manage users",
            Action::ViewOrganization => "view organizations",
            Action::ManageOrganizations => "manage organizations",
        }
    }

    /// Actions a platform role performs across tenants.
    fn is_platform_scoped(&self) -> bool {
        matches!(self, Action::ViewOrganization | Action::ManageOrganizations)
    }
}

pub fn role_permits(role: Role, action: Action) -> bool {
    use Action::*;
    use Role::*;

    match action {
        ReadInvoice => matches!(role, Admin | Manager | Hr | PayrollHr),
        WriteInvoice | SendInvoice => matches!(role, Admin | Manager),
        DeleteInvoice => matches!(role, Admin),
        ReadTemplate | WriteTemplate => matches!(role, Admin | Manager),
        DeleteTemplate => matches!(role, Admin),
        ReadEmployees => matches!(role, Admin | Hr | Manager | PayrollHr),
        WriteEmployees => matches!(role, Admin | Hr),
        ManageUsers => matches!(role, Admin),
        ViewOrganization => true,
        ManageOrganizations => matches!(role, SuperAdmin),
    }
}

/// Allows `action` when the role carries the capability and, for tenant-owned
/// resources, the caller belongs to the owning tenant. The tenant comparison
/// applies to every role except platform roles on platform-scoped actions.
pub fn authorize(
    role: Role,
    action: Action,
    resource_tenant: Option<Uuid>,
    caller_tenant: Option<Uuid>,
) -> Result<(), DomainError> {
    if !role_permits(role, action) {
        return Err(DomainError::Forbidden(format!(
            "role '{}' is not allowed to {}",
            role.as_str(),
            action.as_str()
        )));
    }

    if role.is_platform() && action.is_platform_scoped() {
        return Ok(());
    }

    match resource_tenant {
        Some(tenant) if caller_tenant != Some(tenant) => Err(DomainError::Forbidden(
            "resource belongs to another organization".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Authenticated caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: Role,
    pub organization_id: Option<Uuid>,
}

impl Actor {
    pub fn new(user_id: Uuid, role: Role, organization_id: Option<Uuid>) -> Self {
        Self { user_id, role, organization_id }
    }

    pub fn authorize(&self, action: Action, resource_tenant: Option<Uuid>) -> Result<(), DomainError> {
        authorize(self.role, action, resource_tenant, self.organization_id)
    }

    /// Authorizes an action on the caller's own tenant and returns that tenant.
    pub fn authorize_in_own_tenant(&self, action: Action) -> Result<Uuid, DomainError> {
        let tenant = self.organization_id.ok_or_else(|| {
            DomainError::Forbidden("caller does not belong to an organization".to_string())
        })?;
        self.authorize(action, Some(tenant))?;
        Ok(tenant)
    }
}
