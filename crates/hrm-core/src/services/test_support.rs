//! Shared fixtures for service tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hrm_shared::{Page, Pagination};
use uuid::Uuid;

use crate::domain::{EmailTemplate, Organization, Role, SubscriptionPlan};
use crate::error::DomainError;
use crate::policy::Actor;
use crate::repositories::{EmailTemplateRepository, MockOrganizationRepository};
use crate::services::ModuleGate;

pub fn organization(plan: SubscriptionPlan) -> Organization {
    Organization::new("Acme Corp".to_string(), plan, None).unwrap()
}

pub fn actor(role: Role, organization_id: Uuid) -> Actor {
    Actor::new(Uuid::new_v4(), role, Some(organization_id))
}

/// Gate whose lookups always return `organization`.
pub fn gate_for(organization: Organization) -> ModuleGate {
    let mut repo = MockOrganizationRepository::new();
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(organization.clone())));
    ModuleGate::new(Arc::new(repo))
}

/// Gate that must never be consulted.
pub fn unused_gate() -> ModuleGate {
    let mut repo = MockOrganizationRepository::new();
    repo.expect_find_by_id().never();
    ModuleGate::new(Arc::new(repo))
}

/// Template store honoring the single-default contract of
/// `EmailTemplateRepository`.
#[derive(Default)]
pub struct InMemoryTemplates {
    rows: Mutex<HashMap<Uuid, EmailTemplate>>,
}

impl InMemoryTemplates {
    pub fn defaults_for(&self, organization_id: &Uuid) -> Vec<EmailTemplate> {
        self.rows
            .lock()
            .unwrap()
            .values()
            .filter(|t| t.organization_id == *organization_id && t.is_default)
            .cloned()
            .collect()
    }

    fn save(&self, template: &EmailTemplate) -> EmailTemplate {
        let mut rows = self.rows.lock().unwrap();
        if template.is_default {
            for other in rows.values_mut() {
                if other.organization_id == template.organization_id && other.id != template.id {
                    other.is_default = false;
                }
            }
        }
        rows.insert(template.id, template.clone());
        template.clone()
    }
}

#[async_trait]
impl EmailTemplateRepository for InMemoryTemplates {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<EmailTemplate>, DomainError> {
        Ok(self.rows.lock().unwrap().get(id).cloned())
    }

    async fn find_default(&self, organization_id: &Uuid) -> Result<Option<EmailTemplate>, DomainError> {
        Ok(self.defaults_for(organization_id).into_iter().next())
    }

    async fn list(&self, organization_id: &Uuid, pagination: Pagination) -> Result<Page<EmailTemplate>, DomainError> {
        let items: Vec<EmailTemplate> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|t| t.organization_id == *organization_id)
            .cloned()
            .collect();
        let total = items.len() as u64;
        Ok(Page::new(items, total, pagination))
    }

    async fn create(&self, template: &EmailTemplate) -> Result<EmailTemplate, DomainError> {
        Ok(self.save(template))
    }

    async fn update(&self, template: &EmailTemplate) -> Result<EmailTemplate, DomainError> {
        Ok(self.save(template))
    }

    async fn delete(&self, id: &Uuid, organization_id: &Uuid) -> Result<bool, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get(id) {
            Some(t) if t.organization_id == *organization_id && !t.is_default => {
                rows.remove(id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
