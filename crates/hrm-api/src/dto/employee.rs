//! Employee DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use hrm_core::services::NewEmployee;
use hrm_core::{BankInfo, EmploymentInfo, PersonalInfo};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub user_id: Uuid,

    #[validate(length(min = 1, max = 50, message = "Employee code must be between 1 and 50 characters"))]
    pub employee_code: String,

    #[serde(default)]
    pub personal: PersonalInfo,
    #[serde(default)]
    pub employment: EmploymentInfo,
    #[serde(default)]
    pub bank: BankInfo,
}

impl From<CreateEmployeeRequest> for NewEmployee {
    fn from(req: CreateEmployeeRequest) -> Self {
        Self {
            user_id: req.user_id,
            employee_code: req.employee_code,
            personal: req.personal,
            employment: req.employment,
            bank: req.bank,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_are_optional() {
        let user_id = Uuid::new_v4();
        let req: CreateEmployeeRequest = serde_json::from_str(&format!(
            r#"{{"userId": "{}", "employeeCode": "EMP-7", "employment": {{"department": "Sales"}}}}"#,
            user_id
        ))
        .unwrap();
        assert!(req.validate().is_ok());

        let input = NewEmployee::from(req);
        assert_eq!(input.user_id, user_id);
        assert_eq!(input.employment.department.as_deref(), Some("Sales"));
        assert_eq!(input.personal, PersonalInfo::default());
    }
}
