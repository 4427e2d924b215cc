//! Invoice document renderer trait (port)

use crate::domain::Invoice;
use crate::error::DomainError;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Produces a document keyed only by invoice content.
#[cfg_attr(test, mockall::automock)]
pub trait InvoiceRenderer: Send + Sync {
    fn render(&self, invoice: &Invoice) -> Result<Vec<u8>, DomainError>;
}
