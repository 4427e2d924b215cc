//! User domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// User role enumeration. `SuperAdmin` is the platform operator and belongs to
/// no organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "employee")]
    Employee,
    #[serde(rename = "manager")]
    Manager,
    #[serde(rename = "hr")]
    Hr,
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "payrolHr")]
    PayrollHr,
    #[serde(rename = "superAdmin")]
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Manager => "manager",
            Role::Hr => "hr",
            Role::Admin => "admin",
            Role::PayrollHr => "payrolHr",
            Role::SuperAdmin => "superAdmin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "employee" => Some(Role::Employee),
            "manager" => Some(Role::Manager),
            "hr" => Some(Role::Hr),
            "admin" => Some(Role::Admin),
            "payrolHr" => Some(Role::PayrollHr),
            "superAdmin" => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    pub fn is_platform(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Employee
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(UserStatus::Active),
            "inactive" => Some(UserStatus::Inactive),
            _ => None,
        }
    }
}

impl Default for UserStatus {
    fn default() -> Self {
        UserStatus::Active
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct User {
    pub id: Uuid,

    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[serde(skip_serializing)]
    pub password_hash: String,

    pub role: Role,
    pub organization_id: Option<Uuid>,
    pub status: UserStatus,
    pub last_login_at: Option<DateTime<Utc>>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(
        name: String,
        email: String,
        password_hash: String,
        role: Role,
        organization_id: Option<Uuid>,
        created_by: Option<Uuid>,
    ) -> Result<Self, validator::ValidationErrors> {
        let user = Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            password_hash,
            role,
            organization_id,
            status: UserStatus::Active,
            last_login_at: None,
            created_at: Utc::now(),
            created_by,
            modified_at: None,
        };

        user.validate()?;
        Ok(user)
    }

    pub fn can_login(&self) -> bool {
        self.status == UserStatus::Active
    }

    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.modified_at = Some(now);
    }
}
