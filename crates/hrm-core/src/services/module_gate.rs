//! Plan-based module access checks

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::domain::{Feature, Organization};
use crate::error::DomainError;
use crate::repositories::OrganizationRepository;

#[derive(Clone)]
pub struct ModuleGate {
    organizations: Arc<dyn OrganizationRepository>,
}

impl ModuleGate {
    pub fn new(organizations: Arc<dyn OrganizationRepository>) -> Self {
        Self { organizations }
    }

    pub async fn organization(&self, organization_id: &Uuid) -> Result<Organization, DomainError> {
        self.organizations
            .find_by_id(organization_id)
            .await?
            .ok_or(DomainError::OrganizationNotFound)
    }

    pub async fn require(&self, organization_id: &Uuid, feature: Feature) -> Result<Organization, DomainError> {
        let organization = self.organization(organization_id).await?;
        if let Err(e) = organization.ensure_feature(feature) {
            warn!(
                "Module {} blocked for organization {} (plan: {}, status: {})",
                feature.as_str(),
                organization_id,
                organization.subscription_plan.as_str(),
                organization.subscription_status.as_str()
            );
            return Err(e);
        }
        Ok(organization)
    }
}
