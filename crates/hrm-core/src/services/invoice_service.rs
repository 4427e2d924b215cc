// ============================================================================
// HRM Core - Invoice Service
// File: crates/hrm-core/src/services/invoice_service.rs
// Description: Invoice CRUD with the Paid guard and settlement transitions
// ============================================================================

use std::sync::Arc;

use chrono::Utc;
use hrm_shared::{Page, Pagination};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{Feature, Invoice, InvoiceChanges, InvoiceStatus, MutationKind, NewInvoice};
use crate::error::DomainError;
use crate::policy::{Action, Actor};
use crate::repositories::InvoiceRepository;
use crate::services::ModuleGate;

pub struct InvoiceService {
    invoices: Arc<dyn InvoiceRepository>,
    gate: ModuleGate,
}

impl InvoiceService {
    pub fn new(invoices: Arc<dyn InvoiceRepository>, gate: ModuleGate) -> Self {
        Self { invoices, gate }
    }

    pub async fn create(&self, actor: &Actor, input: NewInvoice) -> Result<Invoice, DomainError> {
        let organization_id = actor.authorize_in_own_tenant(Action::WriteInvoice)?;
        self.gate.require(&organization_id, Feature::Crm).await?;

        let invoice = Invoice::new(organization_id, input, actor.user_id)?;
        let created = self.invoices.create(&invoice).await?;

        info!(
            "Invoice {} created for organization {} (grand total {})",
            created.invoice_no, organization_id, created.grand_total
        );
        Ok(created)
    }

    pub async fn get(&self, actor: &Actor, id: &Uuid) -> Result<Invoice, DomainError> {
        self.load(actor, id, Action::ReadInvoice).await
    }

    pub async fn list(
        &self,
        actor: &Actor,
        status: Option<InvoiceStatus>,
        pagination: Pagination,
    ) -> Result<Page<Invoice>, DomainError> {
        let organization_id = actor.authorize_in_own_tenant(Action::ReadInvoice)?;
        self.gate.require(&organization_id, Feature::Crm).await?;
        self.invoices.list(&organization_id, status, pagination).await
    }

    /// The Paid guard runs before any recompute or write. The repository
    /// re-checks it atomically, so a payment landing after the read still
    /// rejects the update.
    pub async fn update(
        &self,
        actor: &Actor,
        id: &Uuid,
        changes: InvoiceChanges,
    ) -> Result<Invoice, DomainError> {
        let mut invoice = self.load(actor, id, Action::WriteInvoice).await?;
        invoice.apply_changes(changes, actor.user_id)?;

        let updated = self.invoices.update(&invoice).await?.ok_or_else(|| {
            warn!("Invoice {} was paid before the update could be written", id);
            DomainError::PaidInvoiceImmutable(MutationKind::Update)
        })?;

        info!("Invoice {} updated", updated.invoice_no);
        Ok(updated)
    }

    pub async fn delete(&self, actor: &Actor, id: &Uuid) -> Result<(), DomainError> {
        let invoice = self.load(actor, id, Action::DeleteInvoice).await?;
        invoice.ensure_mutable(MutationKind::Delete)?;

        if !self.invoices.delete(id, &invoice.organization_id).await? {
            // Either paid or removed since the read.
            return match self.invoices.find_by_id(id).await? {
                Some(_) => Err(DomainError::PaidInvoiceImmutable(MutationKind::Delete)),
                None => Err(DomainError::InvoiceNotFound),
            };
        }

        info!("Invoice {} deleted", invoice.invoice_no);
        Ok(())
    }

    /// Settlement transitions: Paid, Overdue, Cancelled.
    pub async fn update_status(
        &self,
        actor: &Actor,
        id: &Uuid,
        status: InvoiceStatus,
    ) -> Result<Invoice, DomainError> {
        let mut invoice = self.load(actor, id, Action::WriteInvoice).await?;
        let from = invoice.status;
        invoice.transition_to(status, Utc::now(), actor.user_id)?;

        let updated = self
            .invoices
            .update(&invoice)
            .await?
            .ok_or(DomainError::InvalidStatusTransition {
                from: InvoiceStatus::Paid,
                to: status,
            })?;

        info!("Invoice {} moved from {} to {}", updated.invoice_no, from, status);
        Ok(updated)
    }

    /// Fetches an invoice the caller may act on. Not found, then tenant and
    /// role, then module availability.
    pub(crate) async fn load(&self, actor: &Actor, id: &Uuid, action: Action) -> Result<Invoice, DomainError> {
        let invoice = self
            .invoices
            .find_by_id(id)
            .await?
            .ok_or(DomainError::InvoiceNotFound)?;
        actor.authorize(action, Some(invoice.organization_id))?;
        self.gate.require(&invoice.organization_id, Feature::Crm).await?;
        Ok(invoice)
    }
}
