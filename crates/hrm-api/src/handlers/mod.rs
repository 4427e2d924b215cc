//! HTTP handlers

pub mod health;
pub mod auth;
pub mod organizations;
pub mod users;
pub mod employees;
pub mod invoices;
pub mod email_templates;
