//! Domain services (business logic)

pub mod module_gate;
pub mod auth_service;
pub mod organization_service;
pub mod user_service;
pub mod employee_service;
pub mod invoice_service;
pub mod email_template_service;
pub mod invoice_delivery_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use module_gate::ModuleGate;
pub use auth_service::{AuthService, LoginResult, UserInfo};
pub use organization_service::OrganizationService;
pub use user_service::{NewUser, UserService};
pub use employee_service::{EmployeeService, NewEmployee};
pub use invoice_service::InvoiceService;
pub use email_template_service::EmailTemplateService;
pub use invoice_delivery_service::{InvoiceDeliveryService, RenderedDocument};
