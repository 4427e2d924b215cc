// ============================================================================
// HRM Infrastructure - PostgreSQL User Repository
// File: crates/hrm-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use hrm_core::domain::{Role, User, UserStatus};
use hrm_core::error::DomainError;
use hrm_core::repositories::UserRepository;
use hrm_shared::utils::mask_email;

use super::{db_error, unique_violation};

const COLUMNS: &str = r#"
    id, name, email, password_hash, role, organization_id, status,
    last_login_at, created_at, created_by, modified_at
"#;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    organization_id: Option<Uuid>,
    status: String,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    created_by: Option<Uuid>,
    modified_at: Option<DateTime<Utc>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role: Role::from_str(&row.role).unwrap_or_default(),
            organization_id: row.organization_id,
            status: UserStatus::from_str(&row.status).unwrap_or_default(),
            last_login_at: row.last_login_at,
            created_at: row.created_at,
            created_by: row.created_by,
            modified_at: row.modified_at,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("SELECT {} FROM users WHERE id = $1", COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("finding user by id", e))?;

        Ok(row.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE LOWER(email) = LOWER($1)", COLUMNS))
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("finding user by email", e))?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, user: &User) -> Result<User, DomainError> {
        info!("Creating user with email: {}", mask_email(&user.email));

        let row: UserRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO users (
                id, name, email, password_hash, role, organization_id, status,
                last_login_at, created_at, created_by, modified_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.organization_id)
        .bind(user.status.as_str())
        .bind(user.last_login_at)
        .bind(user.created_at)
        .bind(user.created_by)
        .bind(user.modified_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if unique_violation(&e).is_some() {
                error!("Duplicate email on user create: {}", mask_email(&user.email));
                return DomainError::EmailAlreadyExists(user.email.clone());
            }
            db_error("creating user", e)
        })?;

        Ok(row.into())
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            r#"
            UPDATE users SET
                name = $2,
                role = $3,
                status = $4,
                last_login_at = $5,
                modified_at = $6
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(user.id)
        .bind(&user.name)
        .bind(user.role.as_str())
        .bind(user.status.as_str())
        .bind(user.last_login_at)
        .bind(user.modified_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("updating user", e))?;

        row.map(Into::into).ok_or(DomainError::UserNotFound)
    }
}
