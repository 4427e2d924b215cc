//! Placeholder substitution for invoice emails.
//!
//! Replacement is literal and global. Unknown tokens are left as they are and
//! nothing is escaped.

use crate::domain::{EmailTemplate, Invoice};

pub const CLIENT_NAME: &str = "{{clientName}}";
pub const INVOICE_NO: &str = "{{invoiceNo}}";
pub const TOTAL_AMOUNT: &str = "{{totalAmount}}";
pub const GRAND_TOTAL: &str = "{{grandTotal}}";
pub const DUE_DATE: &str = "{{dueDate}}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub subject: String,
    pub body: String,
}

fn values(invoice: &Invoice) -> [(&'static str, String); 5] {
    [
        (CLIENT_NAME, invoice.client.name.clone()),
        (INVOICE_NO, invoice.invoice_no.clone()),
        (TOTAL_AMOUNT, format!("{:.2}", invoice.total_amount)),
        (GRAND_TOTAL, format!("{:.2}", invoice.grand_total)),
        (
            DUE_DATE,
            invoice
                .due_date
                .map(|date| date.format("%-m/%-d/%Y").to_string())
                .unwrap_or_else(|| "N/A".to_string()),
        ),
    ]
}

pub fn substitute(text: &str, invoice: &Invoice) -> String {
    values(invoice)
        .iter()
        .fold(text.to_string(), |acc, (token, value)| acc.replace(token, value))
}

pub fn render_message(template: &EmailTemplate, invoice: &Invoice) -> RenderedMessage {
    RenderedMessage {
        subject: substitute(&template.subject, invoice),
        body: substitute(&template.body, invoice),
    }
}
