//! Outbound mail

pub mod smtp;

pub use smtp::SmtpMailTransport;
