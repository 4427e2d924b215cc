//! Outbound mail transport trait (port)

use async_trait::async_trait;

use crate::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAttachment {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    /// HTML body.
    pub body: String,
    pub attachments: Vec<MailAttachment>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Returns `TransportFailed` when the message cannot be handed off.
    async fn send(&self, mail: OutgoingMail) -> Result<(), DomainError>;
}
