//! # HRM Core
//! 
//! Domain entities, billing rules, authorization policy, services, and the
//! repository/gateway traits the infrastructure layer implements.

pub mod domain;
pub mod billing;
pub mod policy;
pub mod gateways;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
pub use policy::{Action, Actor};
