//! Email template domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone)]
pub struct NewEmailTemplate {
    pub name: String,
    pub subject: String,
    pub body: String,
    pub is_default: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EmailTemplateChanges {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub is_default: Option<bool>,
}

/// Tenant-owned email template. Subject and body carry `{{placeholder}}`
/// tokens filled at dispatch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplate {
    pub id: Uuid,
    pub organization_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Template name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Subject must be between 1 and 255 characters"))]
    pub subject: String,

    #[validate(length(min = 1, message = "Body is required"))]
    pub body: String,

    pub is_default: bool,

    // Audit fields
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl EmailTemplate {
    pub fn new(
        organization_id: Uuid,
        input: NewEmailTemplate,
        created_by: Uuid,
    ) -> Result<Self, validator::ValidationErrors> {
        let template = Self {
            id: Uuid::new_v4(),
            organization_id,
            name: input.name.trim().to_string(),
            subject: input.subject,
            body: input.body,
            is_default: input.is_default,
            created_by,
            created_at: Utc::now(),
            modified_at: None,
        };

        template.validate()?;
        Ok(template)
    }

    pub fn apply_changes(&mut self, changes: EmailTemplateChanges) -> Result<(), validator::ValidationErrors> {
        if let Some(name) = changes.name {
            self.name = name.trim().to_string();
        }
        if let Some(subject) = changes.subject {
            self.subject = subject;
        }
        if let Some(body) = changes.body {
            self.body = body;
        }
        if let Some(is_default) = changes.is_default {
            self.is_default = is_default;
        }
        self.modified_at = Some(Utc::now());
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(is_default: bool) -> NewEmailTemplate {
        NewEmailTemplate {
            name: " Standard ".to_string(),
            subject: "Invoice {{invoiceNo}}".to_string(),
            body: "Hello {{clientName}}".to_string(),
            is_default,
        }
    }

    #[test]
    fn test_create_template() {
        let template = EmailTemplate::new(Uuid::new_v4(), input(true), Uuid::new_v4()).unwrap();
        assert_eq!(template.name, "Standard");
        assert!(template.is_default);
    }

    #[test]
    fn test_changes_are_validated() {
        let mut template = EmailTemplate::new(Uuid::new_v4(), input(false), Uuid::new_v4()).unwrap();
        let result = template.apply_changes(EmailTemplateChanges {
            subject: Some(String::new()),
            ..Default::default()
        });
        assert!(result.is_err());
    }
}
