//! Request and response DTOs

pub mod common;
pub mod auth;
pub mod organization;
pub mod user;
pub mod employee;
pub mod invoice;
pub mod email_template;

pub use common::PaginationQuery;
