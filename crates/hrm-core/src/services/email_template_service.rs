//! Email template management and dispatch-time template resolution

use std::sync::Arc;

use hrm_shared::{Page, Pagination};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{EmailTemplate, EmailTemplateChanges, Feature, NewEmailTemplate};
use crate::error::DomainError;
use crate::policy::{Action, Actor};
use crate::repositories::EmailTemplateRepository;
use crate::services::ModuleGate;

pub struct EmailTemplateService {
    templates: Arc<dyn EmailTemplateRepository>,
    gate: ModuleGate,
}

impl EmailTemplateService {
    pub fn new(templates: Arc<dyn EmailTemplateRepository>, gate: ModuleGate) -> Self {
        Self { templates, gate }
    }

    /// A template created as default replaces the previous default.
    pub async fn create(&self, actor: &Actor, input: NewEmailTemplate) -> Result<EmailTemplate, DomainError> {
        let organization_id = actor.authorize_in_own_tenant(Action::WriteTemplate)?;
        self.gate.require(&organization_id, Feature::Crm).await?;

        let template = EmailTemplate::new(organization_id, input, actor.user_id)?;
        let created = self.templates.create(&template).await?;

        info!(
            "Email template {} created for organization {} (default: {})",
            created.id, organization_id, created.is_default
        );
        Ok(created)
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: &Uuid,
        changes: EmailTemplateChanges,
    ) -> Result<EmailTemplate, DomainError> {
        let mut template = self.load(actor, id, Action::WriteTemplate).await?;
        template.apply_changes(changes)?;

        let updated = self.templates.update(&template).await?;
        info!("Email template {} updated (default: {})", updated.id, updated.is_default);
        Ok(updated)
    }

    pub async fn delete(&self, actor: &Actor, id: &Uuid) -> Result<(), DomainError> {
        let template = self.load(actor, id, Action::DeleteTemplate).await?;
        if template.is_default {
            return Err(DomainError::DefaultTemplateDeletion);
        }

        if !self.templates.delete(id, &template.organization_id).await? {
            // Promoted to default or removed since the read.
            return match self.templates.find_by_id(id).await? {
                Some(_) => Err(DomainError::DefaultTemplateDeletion),
                None => Err(DomainError::TemplateNotFound),
            };
        }

        info!("Email template {} deleted", id);
        Ok(())
    }

    pub async fn get(&self, actor: &Actor, id: &Uuid) -> Result<EmailTemplate, DomainError> {
        self.load(actor, id, Action::ReadTemplate).await
    }

    pub async fn list(&self, actor: &Actor, pagination: Pagination) -> Result<Page<EmailTemplate>, DomainError> {
        let organization_id = actor.authorize_in_own_tenant(Action::ReadTemplate)?;
        self.gate.require(&organization_id, Feature::Crm).await?;
        self.templates.list(&organization_id, pagination).await
    }

    /// Picks the template for a dispatch: the explicit one when given,
    /// otherwise the organization's default.
    pub async fn resolve(
        &self,
        organization_id: &Uuid,
        template_id: Option<Uuid>,
    ) -> Result<EmailTemplate, DomainError> {
        match template_id {
            Some(id) => {
                let template = self
                    .templates
                    .find_by_id(&id)
                    .await?
                    .ok_or(DomainError::TemplateNotFound)?;
                if template.organization_id != *organization_id {
                    warn!("Template {} requested outside organization {}", id, organization_id);
                    return Err(DomainError::Forbidden(
                        "template belongs to another organization".to_string(),
                    ));
                }
                Ok(template)
            }
            None => self
                .templates
                .find_default(organization_id)
                .await?
                .ok_or(DomainError::DefaultTemplateNotFound),
        }
    }

    async fn load(&self, actor: &Actor, id: &Uuid, action: Action) -> Result<EmailTemplate, DomainError> {
        let template = self
            .templates
            .find_by_id(id)
            .await?
            .ok_or(DomainError::TemplateNotFound)?;
        actor.authorize(action, Some(template.organization_id))?;
        self.gate.require(&template.organization_id, Feature::Crm).await?;
        Ok(template)
    }
}
