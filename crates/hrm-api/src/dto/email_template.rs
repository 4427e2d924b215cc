//! Email template DTOs

use serde::Deserialize;
use validator::Validate;

use hrm_core::{EmailTemplateChanges, NewEmailTemplate};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest {
    #[validate(length(min = 1, max = 100, message = "Template name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Subject must be between 1 and 255 characters"))]
    pub subject: String,

    #[validate(length(min = 1, message = "Body is required"))]
    pub body: String,

    #[serde(default)]
    pub is_default: bool,
}

impl From<CreateTemplateRequest> for NewEmailTemplate {
    fn from(req: CreateTemplateRequest) -> Self {
        Self {
            name: req.name,
            subject: req.subject,
            body: req.body,
            is_default: req.is_default,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplateRequest {
    #[validate(length(min = 1, max = 100, message = "Template name must be between 1 and 100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Subject must be between 1 and 255 characters"))]
    pub subject: Option<String>,

    #[validate(length(min = 1, message = "Body is required"))]
    pub body: Option<String>,

    pub is_default: Option<bool>,
}

impl From<UpdateTemplateRequest> for EmailTemplateChanges {
    fn from(req: UpdateTemplateRequest) -> Self {
        Self {
            name: req.name,
            subject: req.subject,
            body: req.body,
            is_default: req.is_default,
        }
    }
}
