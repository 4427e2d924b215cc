//! Repository traits (ports)

pub mod organization_repository;
pub mod user_repository;
pub mod employee_repository;
pub mod invoice_repository;
pub mod email_template_repository;

pub use organization_repository::OrganizationRepository;
pub use user_repository::UserRepository;
pub use employee_repository::EmployeeRepository;
pub use invoice_repository::InvoiceRepository;
pub use email_template_repository::EmailTemplateRepository;

#[cfg(test)]
pub use organization_repository::MockOrganizationRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use employee_repository::MockEmployeeRepository;
#[cfg(test)]
pub use invoice_repository::MockInvoiceRepository;
#[cfg(test)]
pub use email_template_repository::MockEmailTemplateRepository;
