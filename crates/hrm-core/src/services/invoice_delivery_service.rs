// ============================================================================
// HRM Core - Invoice Delivery Service
// File: crates/hrm-core/src/services/invoice_delivery_service.rs
// Description: PDF rendering and email dispatch of invoices
// ============================================================================
//! Delivery is at-least-once: the status write happens after the email is
//! handed off, so a failed write leaves a sent email with an unrecorded
//! status, and a retry sends it again.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::billing::render_message;
use crate::domain::Invoice;
use crate::error::DomainError;
use crate::gateways::renderer::PDF_CONTENT_TYPE;
use crate::gateways::{InvoiceRenderer, MailAttachment, MailTransport, OutgoingMail};
use crate::policy::{Action, Actor};
use crate::repositories::InvoiceRepository;
use crate::services::{EmailTemplateService, InvoiceService};

/// Rendered invoice document ready for download.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub filename: String,
    pub content: Vec<u8>,
}

pub struct InvoiceDeliveryService {
    invoices: Arc<InvoiceService>,
    invoice_repo: Arc<dyn InvoiceRepository>,
    templates: Arc<EmailTemplateService>,
    renderer: Arc<dyn InvoiceRenderer>,
    transport: Arc<dyn MailTransport>,
}

impl InvoiceDeliveryService {
    pub fn new(
        invoices: Arc<InvoiceService>,
        invoice_repo: Arc<dyn InvoiceRepository>,
        templates: Arc<EmailTemplateService>,
        renderer: Arc<dyn InvoiceRenderer>,
        transport: Arc<dyn MailTransport>,
    ) -> Self {
        Self {
            invoices,
            invoice_repo,
            templates,
            renderer,
            transport,
        }
    }

    pub async fn render_pdf(&self, actor: &Actor, id: &Uuid) -> Result<RenderedDocument, DomainError> {
        let invoice = self.invoices.load(actor, id, Action::ReadInvoice).await?;
        let content = self.renderer.render(&invoice)?;
        Ok(RenderedDocument {
            filename: invoice.pdf_filename(),
            content,
        })
    }

    /// Emails the invoice to its client with the PDF attached and marks it
    /// Sent.
    pub async fn send_invoice(
        &self,
        actor: &Actor,
        id: &Uuid,
        template_id: Option<Uuid>,
    ) -> Result<Invoice, DomainError> {
        // 1. Load, tenant and role check, module gate
        let mut invoice = self.invoices.load(actor, id, Action::SendInvoice).await?;
        invoice.ensure_dispatchable()?;

        // 2. Resolve template
        let template = self.templates.resolve(&invoice.organization_id, template_id).await?;

        // 3. Render attachment and message
        let pdf = self.renderer.render(&invoice)?;
        let message = render_message(&template, &invoice);

        // 4. Hand off to the transport; nothing is persisted on failure
        let mail = OutgoingMail {
            to: invoice.client.email.clone(),
            subject: message.subject,
            body: message.body,
            attachments: vec![MailAttachment {
                filename: invoice.pdf_filename(),
                content_type: PDF_CONTENT_TYPE.to_string(),
                content: pdf,
            }],
        };
        if let Err(e) = self.transport.send(mail).await {
            warn!("Invoice {} was not sent: {}", invoice.id, e);
            return Err(e);
        }

        // 5. Record the dispatch
        invoice.mark_sent(Utc::now(), actor.user_id);
        match self.invoice_repo.update(&invoice).await {
            Ok(Some(updated)) => {
                info!(
                    "Invoice {} sent using template {}",
                    updated.invoice_no, template.id
                );
                Ok(updated)
            }
            Ok(None) => {
                error!("Invoice {} emailed but was paid before its status could be recorded", invoice.id);
                Err(DomainError::DispatchNotRecorded(
                    "invoice was paid concurrently".to_string(),
                ))
            }
            Err(e) => {
                error!("Invoice {} emailed but status write failed: {}", invoice.id, e);
                Err(DomainError::DispatchNotRecorded(e.to_string()))
            }
        }
    }
}
