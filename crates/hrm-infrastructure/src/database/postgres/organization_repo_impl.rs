// ============================================================================
// HRM Infrastructure - PostgreSQL Organization Repository
// File: crates/hrm-infrastructure/src/database/postgres/organization_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use hrm_core::domain::{Organization, PlanFeatures, SubscriptionPlan, SubscriptionStatus};
use hrm_core::error::DomainError;
use hrm_core::repositories::OrganizationRepository;
use hrm_shared::{Page, Pagination};

use super::db_error;

const COLUMNS: &str = r#"
    id, name, subscription_plan, subscription_status, subscription_started_at,
    plan_features, created_at, created_by, modified_at, modified_by
"#;

pub struct PgOrganizationRepository {
    pool: PgPool,
}

impl PgOrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct OrganizationRow {
    id: Uuid,
    name: String,
    subscription_plan: String,
    subscription_status: String,
    subscription_started_at: DateTime<Utc>,
    plan_features: Json<PlanFeatures>,
    created_at: DateTime<Utc>,
    created_by: Option<Uuid>,
    modified_at: Option<DateTime<Utc>>,
    modified_by: Option<Uuid>,
}

impl From<OrganizationRow> for Organization {
    fn from(row: OrganizationRow) -> Self {
        Organization {
            id: row.id,
            name: row.name,
            subscription_plan: SubscriptionPlan::from_str(&row.subscription_plan).unwrap_or_default(),
            subscription_status: SubscriptionStatus::from_str(&row.subscription_status).unwrap_or_default(),
            subscription_started_at: row.subscription_started_at,
            plan_features: row.plan_features.0,
            created_at: row.created_at,
            created_by: row.created_by,
            modified_at: row.modified_at,
            modified_by: row.modified_by,
        }
    }
}

#[async_trait]
impl OrganizationRepository for PgOrganizationRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Organization>, DomainError> {
        let row: Option<OrganizationRow> =
            sqlx::query_as(&format!("SELECT {} FROM organizations WHERE id = $1", COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("finding organization by id", e))?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, pagination: Pagination) -> Result<Page<Organization>, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM organizations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("counting organizations", e))?;

        let rows: Vec<OrganizationRow> = sqlx::query_as(&format!(
            "SELECT {} FROM organizations ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            COLUMNS
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing organizations", e))?;

        Ok(Page::new(
            rows.into_iter().map(Into::into).collect(),
            total as u64,
            pagination,
        ))
    }

    async fn create(&self, organization: &Organization) -> Result<Organization, DomainError> {
        info!("Creating organization: {}", organization.name);

        let row: OrganizationRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO organizations (
                id, name, subscription_plan, subscription_status, subscription_started_at,
                plan_features, created_at, created_by, modified_at, modified_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(organization.id)
        .bind(&organization.name)
        .bind(organization.subscription_plan.as_str())
        .bind(organization.subscription_status.as_str())
        .bind(organization.subscription_started_at)
        .bind(Json(&organization.plan_features))
        .bind(organization.created_at)
        .bind(organization.created_by)
        .bind(organization.modified_at)
        .bind(organization.modified_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("creating organization", e))?;

        Ok(row.into())
    }

    async fn update(&self, organization: &Organization) -> Result<Organization, DomainError> {
        let row: Option<OrganizationRow> = sqlx::query_as(&format!(
            r#"
            UPDATE organizations SET
                name = $2,
                subscription_plan = $3,
                subscription_status = $4,
                subscription_started_at = $5,
                plan_features = $6,
                modified_at = $7,
                modified_by = $8
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(organization.id)
        .bind(&organization.name)
        .bind(organization.subscription_plan.as_str())
        .bind(organization.subscription_status.as_str())
        .bind(organization.subscription_started_at)
        .bind(Json(&organization.plan_features))
        .bind(organization.modified_at)
        .bind(organization.modified_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("updating organization", e))?;

        row.map(Into::into).ok_or(DomainError::OrganizationNotFound)
    }
}
