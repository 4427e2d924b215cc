// ============================================================================
// HRM Infrastructure - PostgreSQL Email Template Repository
// File: crates/hrm-infrastructure/src/database/postgres/email_template_repo_impl.rs
// Description: Template persistence; default switching runs in one transaction
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

use hrm_core::domain::EmailTemplate;
use hrm_core::error::DomainError;
use hrm_core::repositories::EmailTemplateRepository;
use hrm_shared::{Page, Pagination};

use super::db_error;

const COLUMNS: &str = r#"
    id, organization_id, name, subject, body, is_default, created_by, created_at, modified_at
"#;

pub struct PgEmailTemplateRepository {
    pool: PgPool,
}

impl PgEmailTemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clears the default flag on the organization's other templates. Runs
    /// before the write so the partial unique index never sees two defaults.
    async fn clear_other_defaults(
        tx: &mut Transaction<'_, Postgres>,
        template: &EmailTemplate,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE email_templates SET is_default = FALSE, modified_at = NOW()
            WHERE organization_id = $1 AND id <> $2 AND is_default
            "#,
        )
        .bind(template.organization_id)
        .bind(template.id)
        .execute(&mut **tx)
        .await
        .map_err(|e| db_error("clearing default templates", e))?;

        debug!(
            "Cleared {} previous default template(s) in organization {}",
            result.rows_affected(),
            template.organization_id
        );
        Ok(())
    }
}

#[derive(Debug, FromRow)]
struct EmailTemplateRow {
    id: Uuid,
    organization_id: Uuid,
    name: String,
    subject: String,
    body: String,
    is_default: bool,
    created_by: Uuid,
    created_at: DateTime<Utc>,
    modified_at: Option<DateTime<Utc>>,
}

impl From<EmailTemplateRow> for EmailTemplate {
    fn from(row: EmailTemplateRow) -> Self {
        EmailTemplate {
            id: row.id,
            organization_id: row.organization_id,
            name: row.name,
            subject: row.subject,
            body: row.body,
            is_default: row.is_default,
            created_by: row.created_by,
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

#[async_trait]
impl EmailTemplateRepository for PgEmailTemplateRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<EmailTemplate>, DomainError> {
        let row: Option<EmailTemplateRow> =
            sqlx::query_as(&format!("SELECT {} FROM email_templates WHERE id = $1", COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("finding template by id", e))?;

        Ok(row.map(Into::into))
    }

    async fn find_default(&self, organization_id: &Uuid) -> Result<Option<EmailTemplate>, DomainError> {
        let row: Option<EmailTemplateRow> = sqlx::query_as(&format!(
            "SELECT {} FROM email_templates WHERE organization_id = $1 AND is_default",
            COLUMNS
        ))
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding default template", e))?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, organization_id: &Uuid, pagination: Pagination) -> Result<Page<EmailTemplate>, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM email_templates WHERE organization_id = $1")
            .bind(organization_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("counting templates", e))?;

        let rows: Vec<EmailTemplateRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM email_templates
            WHERE organization_id = $1
            ORDER BY is_default DESC, name
            LIMIT $2 OFFSET $3
            "#,
            COLUMNS
        ))
        .bind(organization_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing templates", e))?;

        Ok(Page::new(
            rows.into_iter().map(Into::into).collect(),
            total as u64,
            pagination,
        ))
    }

    async fn create(&self, template: &EmailTemplate) -> Result<EmailTemplate, DomainError> {
        info!("Creating email template '{}' for organization {}", template.name, template.organization_id);

        let mut tx = self.pool.begin().await.map_err(|e| db_error("starting transaction", e))?;

        if template.is_default {
            Self::clear_other_defaults(&mut tx, template).await?;
        }

        let row: EmailTemplateRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO email_templates (
                id, organization_id, name, subject, body, is_default, created_by, created_at, modified_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(template.id)
        .bind(template.organization_id)
        .bind(&template.name)
        .bind(&template.subject)
        .bind(&template.body)
        .bind(template.is_default)
        .bind(template.created_by)
        .bind(template.created_at)
        .bind(template.modified_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_error("creating template", e))?;

        tx.commit().await.map_err(|e| db_error("committing template", e))?;
        Ok(row.into())
    }

    async fn update(&self, template: &EmailTemplate) -> Result<EmailTemplate, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| db_error("starting transaction", e))?;

        if template.is_default {
            Self::clear_other_defaults(&mut tx, template).await?;
        }

        let row: Option<EmailTemplateRow> = sqlx::query_as(&format!(
            r#"
            UPDATE email_templates SET
                name = $3,
                subject = $4,
                body = $5,
                is_default = $6,
                modified_at = $7
            WHERE id = $1 AND organization_id = $2
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(template.id)
        .bind(template.organization_id)
        .bind(&template.name)
        .bind(&template.subject)
        .bind(&template.body)
        .bind(template.is_default)
        .bind(template.modified_at)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| db_error("updating template", e))?;

        // Dropping the transaction on the error path rolls back the cleared
        // defaults.
        let row = row.ok_or(DomainError::TemplateNotFound)?;
        tx.commit().await.map_err(|e| db_error("committing template", e))?;
        Ok(row.into())
    }

    async fn delete(&self, id: &Uuid, organization_id: &Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "DELETE FROM email_templates WHERE id = $1 AND organization_id = $2 AND NOT is_default",
        )
        .bind(id)
        .bind(organization_id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("deleting template", e))?;

        Ok(result.rows_affected() > 0)
    }
}
