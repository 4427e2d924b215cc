//! Organization (tenant) management

use std::sync::Arc;

use hrm_shared::{Page, Pagination};
use tracing::info;
use uuid::Uuid;

use crate::domain::{Organization, SubscriptionPlan};
use crate::error::DomainError;
use crate::policy::{Action, Actor};
use crate::repositories::OrganizationRepository;

pub struct OrganizationService {
    organizations: Arc<dyn OrganizationRepository>,
}

impl OrganizationService {
    pub fn new(organizations: Arc<dyn OrganizationRepository>) -> Self {
        Self { organizations }
    }

    pub async fn create(
        &self,
        actor: &Actor,
        name: String,
        plan: SubscriptionPlan,
    ) -> Result<Organization, DomainError> {
        actor.authorize(Action::ManageOrganizations, None)?;

        let organization = Organization::new(name, plan, Some(actor.user_id))?;
        let created = self.organizations.create(&organization).await?;

        info!("Organization {} created on plan {}", created.id, plan.as_str());
        Ok(created)
    }

    pub async fn get(&self, actor: &Actor, id: &Uuid) -> Result<Organization, DomainError> {
        let organization = self
            .organizations
            .find_by_id(id)
            .await?
            .ok_or(DomainError::OrganizationNotFound)?;
        actor.authorize(Action::ViewOrganization, Some(organization.id))?;
        Ok(organization)
    }

    pub async fn list(&self, actor: &Actor, pagination: Pagination) -> Result<Page<Organization>, DomainError> {
        actor.authorize(Action::ManageOrganizations, None)?;
        self.organizations.list(pagination).await
    }

    /// Moves the organization to `plan`. Feature values always come from the
    /// plan table.
    pub async fn update_subscription(
        &self,
        actor: &Actor,
        id: &Uuid,
        plan: SubscriptionPlan,
    ) -> Result<Organization, DomainError> {
        actor.authorize(Action::ManageOrganizations, None)?;

        let mut organization = self
            .organizations
            .find_by_id(id)
            .await?
            .ok_or(DomainError::OrganizationNotFound)?;
        let previous = organization.subscription_plan;

        organization.change_plan(plan, actor.user_id);
        let updated = self.organizations.update(&organization).await?;

        info!(
            "Organization {} moved from {} to {}",
            id,
            previous.as_str(),
            plan.as_str()
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, SubscriptionStatus};
    use crate::repositories::MockOrganizationRepository;
    use crate::services::test_support;

    fn platform_admin() -> Actor {
        Actor::new(Uuid::new_v4(), Role::SuperAdmin, None)
    }

    #[tokio::test]
    async fn test_only_platform_admin_creates_organizations() {
        let mut repo = MockOrganizationRepository::new();
        repo.expect_create().times(1).returning(|o| Ok(o.clone()));
        let service = OrganizationService::new(Arc::new(repo));

        let created = service
            .create(&platform_admin(), "Acme Corp".to_string(), SubscriptionPlan::Pro)
            .await
            .unwrap();
        assert_eq!(created.plan_features, SubscriptionPlan::Pro.features());

        let tenant_admin = test_support::actor(Role::Admin, Uuid::new_v4());
        let result = service
            .create(&tenant_admin, "Other Corp".to_string(), SubscriptionPlan::Free)
            .await;
        assert!(matches!(result, Err(DomainError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_members_cannot_read_other_organizations() {
        let org = test_support::organization(SubscriptionPlan::Standard);
        let org_id = org.id;
        let mut repo = MockOrganizationRepository::new();
        repo.expect_find_by_id().returning(move |_| Ok(Some(org.clone())));
        let service = OrganizationService::new(Arc::new(repo));

        let member = test_support::actor(Role::Employee, org_id);
        assert!(service.get(&member, &org_id).await.is_ok());

        let outsider = test_support::actor(Role::Admin, Uuid::new_v4());
        assert!(matches!(
            service.get(&outsider, &org_id).await,
            Err(DomainError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_update_subscription_resets_features() {
        let mut org = test_support::organization(SubscriptionPlan::Enterprise);
        org.subscription_status = SubscriptionStatus::Suspended;
        let org_id = org.id;

        let mut repo = MockOrganizationRepository::new();
        repo.expect_find_by_id().returning(move |_| Ok(Some(org.clone())));
        repo.expect_update()
            .withf(|o| o.plan_features == SubscriptionPlan::Free.features())
            .returning(|o| Ok(o.clone()));
        let service = OrganizationService::new(Arc::new(repo));

        let updated = service
            .update_subscription(&platform_admin(), &org_id, SubscriptionPlan::Free)
            .await
            .unwrap();
        assert_eq!(updated.subscription_plan, SubscriptionPlan::Free);
        assert_eq!(updated.subscription_status, SubscriptionStatus::Active);
    }

    #[tokio::test]
    async fn test_update_subscription_unknown_organization() {
        let mut repo = MockOrganizationRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        let service = OrganizationService::new(Arc::new(repo));

        let result = service
            .update_subscription(&platform_admin(), &Uuid::new_v4(), SubscriptionPlan::Pro)
            .await;
        assert!(matches!(result, Err(DomainError::OrganizationNotFound)));
    }
}
