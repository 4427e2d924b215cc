//! Employee domain entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::invoice::Address;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentInfo {
    pub department: Option<String>,
    pub designation: Option<String>,
    pub joining_date: Option<NaiveDate>,
    pub employment_type: Option<String>,
    pub reporting_manager_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankInfo {
    pub account_holder: Option<String>,
    pub account_number: Option<String>,
    pub bank_name: Option<String>,
    pub ifsc_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDocument {
    pub name: String,
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Employee record. Exactly one per user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub user_id: Uuid,
    pub organization_id: Uuid,

    #[validate(length(min = 1, max = 50, message = "Employee code must be between 1 and 50 characters"))]
    pub employee_code: String,

    pub personal: PersonalInfo,
    pub employment: EmploymentInfo,
    pub bank: BankInfo,
    pub documents: Vec<EmployeeDocument>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl Employee {
    pub fn new(
        user_id: Uuid,
        organization_id: Uuid,
        employee_code: String,
        personal: PersonalInfo,
        employment: EmploymentInfo,
        bank: BankInfo,
        created_by: Option<Uuid>,
    ) -> Result<Self, validator::ValidationErrors> {
        let employee = Self {
            id: Uuid::new_v4(),
            user_id,
            organization_id,
            employee_code: employee_code.trim().to_uppercase(),
            personal,
            employment,
            bank,
            documents: Vec::new(),
            created_at: Utc::now(),
            created_by,
            modified_at: None,
        };

        employee.validate()?;
        Ok(employee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_employee_normalizes_code() {
        let employee = Employee::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            " emp-001 ".to_string(),
            PersonalInfo::default(),
            EmploymentInfo::default(),
            BankInfo::default(),
            None,
        )
        .unwrap();
        assert_eq!(employee.employee_code, "EMP-001");
        assert!(employee.documents.is_empty());
    }

    #[test]
    fn test_blank_code_rejected() {
        let employee = Employee::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "   ".to_string(),
            PersonalInfo::default(),
            EmploymentInfo::default(),
            BankInfo::default(),
            None,
        );
        assert!(employee.is_err());
    }
}
