//! Organization DTOs

use serde::Deserialize;
use validator::{Validate, ValidationError};

use hrm_core::SubscriptionPlan;

fn known_plan(plan: &str) -> Result<(), ValidationError> {
    match SubscriptionPlan::from_str(plan) {
        Some(_) => Ok(()),
        None => {
            let mut err = ValidationError::new("plan");
            err.message = Some("Plan must be one of free, standard, pro, enterprise".into());
            Err(err)
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrganizationRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,

    #[serde(default = "default_plan")]
    #[validate(custom(function = "known_plan"))]
    pub plan: String,
}

fn default_plan() -> String {
    SubscriptionPlan::Free.as_str().to_string()
}

impl CreateOrganizationRequest {
    pub fn plan(&self) -> SubscriptionPlan {
        SubscriptionPlan::from_str(&self.plan).unwrap_or(SubscriptionPlan::Free)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSubscriptionRequest {
    #[validate(custom(function = "known_plan"))]
    pub plan: String,
}

impl UpdateSubscriptionRequest {
    pub fn plan(&self) -> SubscriptionPlan {
        SubscriptionPlan::from_str(&self.plan).unwrap_or(SubscriptionPlan::Free)
    }
}
