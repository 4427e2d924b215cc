// ============================================================================
// HRM Infrastructure - PostgreSQL Invoice Repository
// File: crates/hrm-infrastructure/src/database/postgres/invoice_repo_impl.rs
// Description: Invoice persistence; writes are conditional on the stored
//              status not being Paid
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{info, warn};
use uuid::Uuid;

use hrm_core::domain::{ClientInfo, Invoice, InvoiceStatus, LineItem};
use hrm_core::error::DomainError;
use hrm_core::repositories::InvoiceRepository;
use hrm_shared::{Page, Pagination};

use super::{db_error, unique_violation};

const COLUMNS: &str = r#"
    id, organization_id, client, invoice_no, items, total_amount, tax, discount,
    grand_total, status, due_date, notes, terms, sent_at, paid_at,
    created_by, created_at, modified_at, modified_by
"#;

pub struct PgInvoiceRepository {
    pool: PgPool,
}

impl PgInvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct InvoiceRow {
    id: Uuid,
    organization_id: Uuid,
    client: Json<ClientInfo>,
    invoice_no: String,
    items: Json<Vec<LineItem>>,
    total_amount: Decimal,
    tax: Decimal,
    discount: Decimal,
    grand_total: Decimal,
    status: String,
    due_date: Option<NaiveDate>,
    notes: Option<String>,
    terms: Option<String>,
    sent_at: Option<DateTime<Utc>>,
    paid_at: Option<DateTime<Utc>>,
    created_by: Uuid,
    created_at: DateTime<Utc>,
    modified_at: Option<DateTime<Utc>>,
    modified_by: Option<Uuid>,
}

impl From<InvoiceRow> for Invoice {
    fn from(row: InvoiceRow) -> Self {
        Invoice {
            id: row.id,
            organization_id: row.organization_id,
            client: row.client.0,
            invoice_no: row.invoice_no,
            items: row.items.0,
            total_amount: row.total_amount,
            tax: row.tax,
            discount: row.discount,
            grand_total: row.grand_total,
            status: InvoiceStatus::from_str(&row.status).unwrap_or_default(),
            due_date: row.due_date,
            notes: row.notes,
            terms: row.terms,
            sent_at: row.sent_at,
            paid_at: row.paid_at,
            created_by: row.created_by,
            created_at: row.created_at,
            modified_at: row.modified_at,
            modified_by: row.modified_by,
        }
    }
}

fn conflict_or_db(invoice: &Invoice, context: &str, e: sqlx::Error) -> DomainError {
    if unique_violation(&e).is_some() {
        warn!("Invoice number {} already used in organization {}", invoice.invoice_no, invoice.organization_id);
        return DomainError::InvoiceNumberAlreadyExists(invoice.invoice_no.clone());
    }
    db_error(context, e)
}

#[async_trait]
impl InvoiceRepository for PgInvoiceRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Invoice>, DomainError> {
        let row: Option<InvoiceRow> = sqlx::query_as(&format!("SELECT {} FROM invoices WHERE id = $1", COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("finding invoice by id", e))?;

        Ok(row.map(Into::into))
    }

    async fn list(
        &self,
        organization_id: &Uuid,
        status: Option<InvoiceStatus>,
        pagination: Pagination,
    ) -> Result<Page<Invoice>, DomainError> {
        let status = status.map(|s| s.as_str());

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM invoices WHERE organization_id = $1 AND ($2::text IS NULL OR status = $2)",
        )
        .bind(organization_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("counting invoices", e))?;

        let rows: Vec<InvoiceRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM invoices
            WHERE organization_id = $1 AND ($2::text IS NULL OR status = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
            COLUMNS
        ))
        .bind(organization_id)
        .bind(status)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing invoices", e))?;

        Ok(Page::new(
            rows.into_iter().map(Into::into).collect(),
            total as u64,
            pagination,
        ))
    }

    async fn create(&self, invoice: &Invoice) -> Result<Invoice, DomainError> {
        info!("Creating invoice {} for organization {}", invoice.invoice_no, invoice.organization_id);

        let row: InvoiceRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO invoices (
                id, organization_id, client, invoice_no, items, total_amount, tax, discount,
                grand_total, status, due_date, notes, terms, sent_at, paid_at,
                created_by, created_at, modified_at, modified_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(invoice.id)
        .bind(invoice.organization_id)
        .bind(Json(&invoice.client))
        .bind(&invoice.invoice_no)
        .bind(Json(&invoice.items))
        .bind(invoice.total_amount)
        .bind(invoice.tax)
        .bind(invoice.discount)
        .bind(invoice.grand_total)
        .bind(invoice.status.as_str())
        .bind(invoice.due_date)
        .bind(&invoice.notes)
        .bind(&invoice.terms)
        .bind(invoice.sent_at)
        .bind(invoice.paid_at)
        .bind(invoice.created_by)
        .bind(invoice.created_at)
        .bind(invoice.modified_at)
        .bind(invoice.modified_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_or_db(invoice, "creating invoice", e))?;

        Ok(row.into())
    }

    async fn update(&self, invoice: &Invoice) -> Result<Option<Invoice>, DomainError> {
        let row: Option<InvoiceRow> = sqlx::query_as(&format!(
            r#"
            UPDATE invoices SET
                client = $3,
                invoice_no = $4,
                items = $5,
                total_amount = $6,
                tax = $7,
                discount = $8,
                grand_total = $9,
                status = $10,
                due_date = $11,
                notes = $12,
                terms = $13,
                sent_at = $14,
                paid_at = $15,
                modified_at = $16,
                modified_by = $17
            WHERE id = $1 AND organization_id = $2 AND status <> 'Paid'
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(invoice.id)
        .bind(invoice.organization_id)
        .bind(Json(&invoice.client))
        .bind(&invoice.invoice_no)
        .bind(Json(&invoice.items))
        .bind(invoice.total_amount)
        .bind(invoice.tax)
        .bind(invoice.discount)
        .bind(invoice.grand_total)
        .bind(invoice.status.as_str())
        .bind(invoice.due_date)
        .bind(&invoice.notes)
        .bind(&invoice.terms)
        .bind(invoice.sent_at)
        .bind(invoice.paid_at)
        .bind(invoice.modified_at)
        .bind(invoice.modified_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_or_db(invoice, "updating invoice", e))?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: &Uuid, organization_id: &Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "DELETE FROM invoices WHERE id = $1 AND organization_id = $2 AND status <> 'Paid'",
        )
        .bind(id)
        .bind(organization_id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("deleting invoice", e))?;

        Ok(result.rows_affected() > 0)
    }
}
