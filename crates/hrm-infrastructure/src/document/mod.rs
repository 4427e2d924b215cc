//! Invoice document rendering

pub mod pdf;

pub use pdf::LopdfInvoiceRenderer;
