// ============================================================================
// HRM Core - Organization Entity
// File: crates/hrm-core/src/domain/organization.rs
// Description: Tenant entity with subscription plan and plan-derived features
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::DomainError;

/// Subscription plan enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    Free,
    Standard,
    Pro,
    Enterprise,
}

impl SubscriptionPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::Free => "free",
            SubscriptionPlan::Standard => "standard",
            SubscriptionPlan::Pro => "pro",
            SubscriptionPlan::Enterprise => "enterprise",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "free" => Some(SubscriptionPlan::Free),
            "standard" => Some(SubscriptionPlan::Standard),
            "pro" => Some(SubscriptionPlan::Pro),
            "enterprise" => Some(SubscriptionPlan::Enterprise),
            _ => None,
        }
    }

    /// Fixed feature table. There are no per-organization overrides.
    pub fn features(&self) -> PlanFeatures {
        match self {
            SubscriptionPlan::Free => PlanFeatures {
                max_employees: 5,
                max_storage_mb: 1024,
                crm: false,
                attendance: true,
                leaves: true,
                assets: false,
                tasks: true,
                reports: false,
            },
            SubscriptionPlan::Standard => PlanFeatures {
                max_employees: 25,
                max_storage_mb: 10_240,
                crm: true,
                attendance: true,
                leaves: true,
                assets: true,
                tasks: true,
                reports: false,
            },
            SubscriptionPlan::Pro => PlanFeatures {
                max_employees: 100,
                max_storage_mb: 51_200,
                crm: true,
                attendance: true,
                leaves: true,
                assets: true,
                tasks: true,
                reports: true,
            },
            SubscriptionPlan::Enterprise => PlanFeatures {
                max_employees: 10_000,
                max_storage_mb: 512_000,
                crm: true,
                attendance: true,
                leaves: true,
                assets: true,
                tasks: true,
                reports: true,
            },
        }
    }
}

impl Default for SubscriptionPlan {
    fn default() -> Self {
        SubscriptionPlan::Free
    }
}

/// Subscription status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    PastDue,
    Canceled,
    Suspended,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::Suspended => "suspended",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(SubscriptionStatus::Active),
            "past_due" => Some(SubscriptionStatus::PastDue),
            "canceled" => Some(SubscriptionStatus::Canceled),
            "suspended" => Some(SubscriptionStatus::Suspended),
            _ => None,
        }
    }

    /// Modules stay reachable while a payment is late, not after cancellation
    /// or suspension.
    pub fn grants_access(&self) -> bool {
        matches!(self, SubscriptionStatus::Active | SubscriptionStatus::PastDue)
    }
}

impl Default for SubscriptionStatus {
    fn default() -> Self {
        SubscriptionStatus::Active
    }
}

/// Gated product modules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Crm,
    Attendance,
    Leaves,
    Assets,
    Tasks,
    Reports,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Crm => "crm",
            Feature::Attendance => "attendance",
            Feature::Leaves => "leaves",
            Feature::Assets => "assets",
            Feature::Tasks => "tasks",
            Feature::Reports => "reports",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanFeatures {
    pub max_employees: i32,
    pub max_storage_mb: i32,
    pub crm: bool,
    pub attendance: bool,
    pub leaves: bool,
    pub assets: bool,
    pub tasks: bool,
    pub reports: bool,
}

impl PlanFeatures {
    pub fn enables(&self, feature: Feature) -> bool {
        match feature {
            Feature::Crm => self.crm,
            Feature::Attendance => self.attendance,
            Feature::Leaves => self.leaves,
            Feature::Assets => self.assets,
            Feature::Tasks => self.tasks,
            Feature::Reports => self.reports,
        }
    }
}

/// Organization (tenant) entity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: Uuid,

    #[validate(length(min = 2, max = 100, message = "Organization name must be between 2 and 100 characters"))]
    pub name: String,

    pub subscription_plan: SubscriptionPlan,
    pub subscription_status: SubscriptionStatus,
    pub subscription_started_at: DateTime<Utc>,
    pub plan_features: PlanFeatures,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<Uuid>,
}

impl Organization {
    pub fn new(
        name: String,
        plan: SubscriptionPlan,
        created_by: Option<Uuid>,
    ) -> Result<Self, validator::ValidationErrors> {
        let now = Utc::now();
        let organization = Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            subscription_plan: plan,
            subscription_status: SubscriptionStatus::Active,
            subscription_started_at: now,
            plan_features: plan.features(),
            created_at: now,
            created_by,
            modified_at: None,
            modified_by: None,
        };

        organization.validate()?;
        Ok(organization)
    }

    /// Switches plan, resetting every feature value to the plan table,
    /// restarting the subscription clock and reactivating the subscription.
    pub fn change_plan(&mut self, plan: SubscriptionPlan, modified_by: Uuid) {
        let now = Utc::now();
        self.subscription_plan = plan;
        self.plan_features = plan.features();
        self.subscription_status = SubscriptionStatus::Active;
        self.subscription_started_at = now;
        self.modified_at = Some(now);
        self.modified_by = Some(modified_by);
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.subscription_status.grants_access() && self.plan_features.enables(feature)
    }

    pub fn ensure_feature(&self, feature: Feature) -> Result<(), DomainError> {
        if self.has_feature(feature) {
            Ok(())
        } else {
            Err(DomainError::FeatureNotAvailable(feature.as_str().to_string()))
        }
    }

    pub fn can_add_employee(&self, current_count: i64) -> bool {
        current_count < self.plan_features.max_employees as i64
    }
}
