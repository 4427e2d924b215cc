//! User DTOs

use serde::Deserialize;
use validator::Validate;

use hrm_core::services::NewUser;
use hrm_core::Role;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"))]
    pub password: String,

    pub role: Role,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_password_rejected() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{"name": "Jane", "email": "jane@acme.io", "password": "short", "role": "hr"}"#,
        )
        .unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_payroll_role_name() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{"name": "Pat", "email": "pat@acme.io", "password": "s3cret-pass", "role": "payrolHr"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(NewUser::from(req).role, Role::PayrollHr);
    }
}
