//! # HRM Core - Domain Module
//! 
//! Domain entities for the HRM application.

pub mod organization;
pub mod user;
pub mod employee;
pub mod invoice;
pub mod email_template;

// Re-export all entities and enums
pub use organization::{Feature, Organization, PlanFeatures, SubscriptionPlan, SubscriptionStatus};
pub use user::{Role, User, UserStatus};
pub use employee::{BankInfo, Employee, EmployeeDocument, EmploymentInfo, PersonalInfo};
pub use invoice::{
    Address, ClientInfo, Invoice, InvoiceChanges, InvoiceStatus, LineItem, MutationKind, NewInvoice,
};
pub use email_template::{EmailTemplate, EmailTemplateChanges, NewEmailTemplate};
