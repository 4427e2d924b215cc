//! # HRM Infrastructure
//!
//! Database, document, and mail implementations (adapters).

pub mod database;
pub mod document;
pub mod mail;

pub use database::{
    create_pool, run_migrations, PgEmailTemplateRepository, PgEmployeeRepository, PgInvoiceRepository,
    PgOrganizationRepository, PgUserRepository,
};
pub use document::LopdfInvoiceRenderer;
pub use mail::SmtpMailTransport;
