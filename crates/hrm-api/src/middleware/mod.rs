//! Request middleware and guards

pub mod auth;

pub use auth::AuthUser;
