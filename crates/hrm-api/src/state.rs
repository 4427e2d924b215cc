// ============================================================================
// HRM API - Application State
// File: crates/hrm-api/src/state.rs
// ============================================================================

use std::sync::Arc;

use axum::extract::FromRef;

use hrm_core::services::{
    AuthService, EmailTemplateService, EmployeeService, InvoiceDeliveryService, InvoiceService,
    OrganizationService, UserService,
};

/// Shared services handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub organizations: Arc<OrganizationService>,
    pub users: Arc<UserService>,
    pub employees: Arc<EmployeeService>,
    pub invoices: Arc<InvoiceService>,
    pub templates: Arc<EmailTemplateService>,
    pub delivery: Arc<InvoiceDeliveryService>,
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
