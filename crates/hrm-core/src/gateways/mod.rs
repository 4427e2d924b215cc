//! Outbound gateways: document rendering and mail delivery

pub mod renderer;
pub mod mailer;

pub use renderer::InvoiceRenderer;
pub use mailer::{MailAttachment, MailTransport, OutgoingMail};

#[cfg(test)]
pub use renderer::MockInvoiceRenderer;
#[cfg(test)]
pub use mailer::MockMailTransport;
