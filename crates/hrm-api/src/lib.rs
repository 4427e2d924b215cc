//! # HRM API
//!
//! HTTP handlers, middleware, DTOs, and validators.

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod state;

#[cfg(test)]
mod test_support;

pub use error::ApiError;
pub use router::api_router;
pub use state::AppState;
