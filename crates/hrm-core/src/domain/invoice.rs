// ============================================================================
// HRM Core - Invoice Entity
// File: crates/hrm-core/src/domain/invoice.rs
// Description: Invoice entity, line items, and status lifecycle guards
// ============================================================================

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::billing::computation::{self, InvoiceTotals};
use crate::error::DomainError;

/// Invoice status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "Draft",
            InvoiceStatus::Sent => "Sent",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Overdue => "Overdue",
            InvoiceStatus::Cancelled => "Cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Draft" => Some(InvoiceStatus::Draft),
            "Sent" => Some(InvoiceStatus::Sent),
            "Paid" => Some(InvoiceStatus::Paid),
            "Overdue" => Some(InvoiceStatus::Overdue),
            "Cancelled" => Some(InvoiceStatus::Cancelled),
            _ => None,
        }
    }
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Draft
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutations blocked once an invoice is paid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Update,
    Delete,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationKind::Update => f.write_str("update"),
            MutationKind::Delete => f.write_str("delete"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// Non-empty address parts in display order.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(street) = self.street.as_deref().filter(|s| !s.is_empty()) {
            lines.push(street.to_string());
        }
        let locality: Vec<&str> = [&self.city, &self.state, &self.zip_code]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.is_empty())
            .collect();
        if !locality.is_empty() {
            lines.push(locality.join(", "));
        }
        if let Some(country) = self.country.as_deref().filter(|s| !s.is_empty()) {
            lines.push(country.to_string());
        }
        lines
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub quantity: i32,
    pub rate: Decimal,
    /// Always `quantity × rate`, set by recomputation.
    #[serde(default)]
    pub amount: Decimal,
}

impl LineItem {
    /// The amount stays zero until the owning invoice recalculates.
    pub fn new(description: impl Into<String>, quantity: i32, rate: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            rate,
            amount: Decimal::ZERO,
        }
    }
}

/// Input for creating an invoice
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub client: ClientInfo,
    pub invoice_no: String,
    pub items: Vec<LineItem>,
    pub tax: Decimal,
    pub discount: Decimal,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub terms: Option<String>,
}

/// Partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct InvoiceChanges {
    pub client: Option<ClientInfo>,
    pub invoice_no: Option<String>,
    pub items: Option<Vec<LineItem>>,
    pub tax: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub terms: Option<String>,
}

/// Invoice entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub client: ClientInfo,
    pub invoice_no: String,
    pub items: Vec<LineItem>,
    pub total_amount: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub grand_total: Decimal,
    pub status: InvoiceStatus,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub terms: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,

    // Audit fields
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<Uuid>,
}

impl Invoice {
    /// Creates a Draft invoice with derived amounts filled in.
    pub fn new(organization_id: Uuid, input: NewInvoice, created_by: Uuid) -> Result<Self, DomainError> {
        let mut invoice = Self {
            id: Uuid::new_v4(),
            organization_id,
            client: input.client,
            invoice_no: input.invoice_no.trim().to_string(),
            items: input.items,
            total_amount: Decimal::ZERO,
            tax: input.tax,
            discount: input.discount,
            grand_total: Decimal::ZERO,
            status: InvoiceStatus::Draft,
            due_date: input.due_date,
            notes: input.notes,
            terms: input.terms,
            sent_at: None,
            paid_at: None,
            created_by,
            created_at: Utc::now(),
            modified_at: None,
            modified_by: None,
        };
        invoice.recalculate()?;
        Ok(invoice)
    }

    /// Refreshes every derived monetary field. An empty item list leaves the
    /// stored totals untouched and returns `None`.
    pub fn recalculate(&mut self) -> Result<Option<InvoiceTotals>, DomainError> {
        if self.items.is_empty() {
            return Ok(None);
        }
        let totals = computation::compute_totals(&mut self.items, self.tax, self.discount)?;
        self.total_amount = totals.total_amount;
        self.grand_total = totals.grand_total;
        Ok(Some(totals))
    }

    pub fn totals(&self) -> Result<InvoiceTotals, DomainError> {
        InvoiceTotals::from_total(self.total_amount, self.tax, self.discount)
    }

    pub fn ensure_mutable(&self, kind: MutationKind) -> Result<(), DomainError> {
        if self.status == InvoiceStatus::Paid {
            return Err(DomainError::PaidInvoiceImmutable(kind));
        }
        Ok(())
    }

    /// Applies a partial update and recomputes from the resulting item list,
    /// which is the submitted one when present. A failed recompute leaves the
    /// invoice unchanged.
    pub fn apply_changes(&mut self, changes: InvoiceChanges, modified_by: Uuid) -> Result<(), DomainError> {
        self.ensure_mutable(MutationKind::Update)?;
        let mut next = self.clone();
        next.merge(changes);
        next.recalculate()?;
        next.touch(modified_by);
        *self = next;
        Ok(())
    }

    fn merge(&mut self, changes: InvoiceChanges) {
        if let Some(client) = changes.client {
            self.client = client;
        }
        if let Some(invoice_no) = changes.invoice_no {
            self.invoice_no = invoice_no.trim().to_string();
        }
        if let Some(items) = changes.items {
            self.items = items;
        }
        if let Some(tax) = changes.tax {
            self.tax = tax;
        }
        if let Some(discount) = changes.discount {
            self.discount = discount;
        }
        if let Some(due_date) = changes.due_date {
            self.due_date = Some(due_date);
        }
        if let Some(notes) = changes.notes {
            self.notes = Some(notes);
        }
        if let Some(terms) = changes.terms {
            self.terms = Some(terms);
        }
    }

    pub fn ensure_dispatchable(&self) -> Result<(), DomainError> {
        match self.status {
            InvoiceStatus::Paid | InvoiceStatus::Cancelled => Err(DomainError::InvalidStatusTransition {
                from: self.status,
                to: InvoiceStatus::Sent,
            }),
            _ => Ok(()),
        }
    }

    pub fn mark_sent(&mut self, at: DateTime<Utc>, sent_by: Uuid) {
        self.status = InvoiceStatus::Sent;
        self.sent_at = Some(at);
        self.modified_at = Some(at);
        self.modified_by = Some(sent_by);
    }

    /// Settlement transitions driven from outside dispatch. Sent is reachable
    /// only through dispatch and Paid is terminal.
    pub fn transition_to(
        &mut self,
        target: InvoiceStatus,
        at: DateTime<Utc>,
        modified_by: Uuid,
    ) -> Result<(), DomainError> {
        let invalid = DomainError::InvalidStatusTransition { from: self.status, to: target };
        if self.status == InvoiceStatus::Paid {
            return Err(invalid);
        }
        match target {
            InvoiceStatus::Paid => self.paid_at = Some(at),
            InvoiceStatus::Overdue | InvoiceStatus::Cancelled => {}
            InvoiceStatus::Draft | InvoiceStatus::Sent => return Err(invalid),
        }
        self.status = target;
        self.modified_at = Some(at);
        self.modified_by = Some(modified_by);
        Ok(())
    }

    pub fn pdf_filename(&self) -> String {
        format!("invoice-{}.pdf", self.invoice_no)
    }

    fn touch(&mut self, modified_by: Uuid) {
        self.modified_at = Some(Utc::now());
        self.modified_by = Some(modified_by);
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn client() -> ClientInfo {
        ClientInfo {
            name: "Globex Ltd".to_string(),
            email: "billing@globex.test".to_string(),
            phone: None,
            address: Address::default(),
        }
    }

    pub fn new_invoice() -> NewInvoice {
        NewInvoice {
            client: client(),
            invoice_no: "INV-1001".to_string(),
            items: vec![
                LineItem::new("Consulting", 2, Decimal::from(50)),
                LineItem::new("Support", 1, Decimal::from(100)),
            ],
            tax: Decimal::from(10),
            discount: Decimal::from(5),
            due_date: NaiveDate::from_ymd_opt(2025, 1, 15),
            notes: None,
            terms: None,
        }
    }

    pub fn invoice(organization_id: Uuid) -> Invoice {
        Invoice::new(organization_id, new_invoice(), Uuid::new_v4()).unwrap()
    }
}
