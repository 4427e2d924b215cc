//! PostgreSQL employee repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{info, warn};
use uuid::Uuid;

use hrm_core::domain::{BankInfo, Employee, EmployeeDocument, EmploymentInfo, PersonalInfo};
use hrm_core::error::DomainError;
use hrm_core::repositories::EmployeeRepository;
use hrm_shared::{Page, Pagination};

use super::{db_error, unique_violation};

const COLUMNS: &str = r#"
    id, user_id, organization_id, employee_code, personal, employment, bank,
    documents, created_at, created_by, modified_at
"#;

pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EmployeeRow {
    id: Uuid,
    user_id: Uuid,
    organization_id: Uuid,
    employee_code: String,
    personal: Json<PersonalInfo>,
    employment: Json<EmploymentInfo>,
    bank: Json<BankInfo>,
    documents: Json<Vec<EmployeeDocument>>,
    created_at: DateTime<Utc>,
    created_by: Option<Uuid>,
    modified_at: Option<DateTime<Utc>>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id,
            user_id: row.user_id,
            organization_id: row.organization_id,
            employee_code: row.employee_code,
            personal: row.personal.0,
            employment: row.employment.0,
            bank: row.bank.0,
            documents: row.documents.0,
            created_at: row.created_at,
            created_by: row.created_by,
            modified_at: row.modified_at,
        }
    }
}

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Employee>, DomainError> {
        let row: Option<EmployeeRow> =
            sqlx::query_as(&format!("SELECT {} FROM employees WHERE id = $1", COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("finding employee by id", e))?;

        Ok(row.map(Into::into))
    }

    async fn find_by_user_id(&self, user_id: &Uuid) -> Result<Option<Employee>, DomainError> {
        let row: Option<EmployeeRow> =
            sqlx::query_as(&format!("SELECT {} FROM employees WHERE user_id = $1", COLUMNS))
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("finding employee by user", e))?;

        Ok(row.map(Into::into))
    }

    async fn count_by_organization(&self, organization_id: &Uuid) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE organization_id = $1")
            .bind(organization_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("counting employees", e))
    }

    async fn list(&self, organization_id: &Uuid, pagination: Pagination) -> Result<Page<Employee>, DomainError> {
        let total = self.count_by_organization(organization_id).await?;

        let rows: Vec<EmployeeRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM employees
            WHERE organization_id = $1
            ORDER BY employee_code
            LIMIT $2 OFFSET $3
            "#,
            COLUMNS
        ))
        .bind(organization_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing employees", e))?;

        Ok(Page::new(
            rows.into_iter().map(Into::into).collect(),
            total as u64,
            pagination,
        ))
    }

    async fn create(&self, employee: &Employee) -> Result<Employee, DomainError> {
        info!("Creating employee {} for user {}", employee.employee_code, employee.user_id);

        let row: EmployeeRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO employees (
                id, user_id, organization_id, employee_code, personal, employment, bank,
                documents, created_at, created_by, modified_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(employee.id)
        .bind(employee.user_id)
        .bind(employee.organization_id)
        .bind(&employee.employee_code)
        .bind(Json(&employee.personal))
        .bind(Json(&employee.employment))
        .bind(Json(&employee.bank))
        .bind(Json(&employee.documents))
        .bind(employee.created_at)
        .bind(employee.created_by)
        .bind(employee.modified_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match unique_violation(&e).as_deref() {
            Some("employees_user_id_key") => {
                warn!("Employee record already exists for user {}", employee.user_id);
                DomainError::EmployeeAlreadyExists(employee.user_id)
            }
            Some(_) => {
                warn!("Employee code {} already in use", employee.employee_code);
                DomainError::EmployeeCodeAlreadyExists(employee.employee_code.clone())
            }
            None => db_error("creating employee", e),
        })?;

        Ok(row.into())
    }
}
