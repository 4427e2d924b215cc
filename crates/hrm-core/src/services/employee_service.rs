//! Employee records, capped by the plan's employee limit

use std::sync::Arc;

use hrm_shared::{Page, Pagination};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{BankInfo, Employee, EmploymentInfo, PersonalInfo};
use crate::error::DomainError;
use crate::policy::{Action, Actor};
use crate::repositories::{EmployeeRepository, UserRepository};
use crate::services::ModuleGate;

#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub user_id: Uuid,
    pub employee_code: String,
    pub personal: PersonalInfo,
    pub employment: EmploymentInfo,
    pub bank: BankInfo,
}

pub struct EmployeeService {
    employees: Arc<dyn EmployeeRepository>,
    users: Arc<dyn UserRepository>,
    gate: ModuleGate,
}

impl EmployeeService {
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        users: Arc<dyn UserRepository>,
        gate: ModuleGate,
    ) -> Self {
        Self { employees, users, gate }
    }

    pub async fn create(&self, actor: &Actor, input: NewEmployee) -> Result<Employee, DomainError> {
        let organization_id = actor.authorize_in_own_tenant(Action::WriteEmployees)?;
        let organization = self.gate.organization(&organization_id).await?;

        let user = self
            .users
            .find_by_id(&input.user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;
        if user.organization_id != Some(organization_id) {
            return Err(DomainError::Forbidden(
                "user belongs to another organization".to_string(),
            ));
        }

        if self.employees.find_by_user_id(&user.id).await?.is_some() {
            return Err(DomainError::EmployeeAlreadyExists(user.id));
        }

        let count = self.employees.count_by_organization(&organization_id).await?;
        if !organization.can_add_employee(count) {
            warn!(
                "Employee limit reached for organization {} ({} of {})",
                organization_id, count, organization.plan_features.max_employees
            );
            return Err(DomainError::EmployeeLimitReached(organization.plan_features.max_employees));
        }

        let employee = Employee::new(
            user.id,
            organization_id,
            input.employee_code,
            input.personal,
            input.employment,
            input.bank,
            Some(actor.user_id),
        )?;
        let created = self.employees.create(&employee).await?;

        info!("Employee {} created for user {}", created.employee_code, user.id);
        Ok(created)
    }

    pub async fn get(&self, actor: &Actor, id: &Uuid) -> Result<Employee, DomainError> {
        let employee = self
            .employees
            .find_by_id(id)
            .await?
            .ok_or(DomainError::EmployeeNotFound)?;
        actor.authorize(Action::ReadEmployees, Some(employee.organization_id))?;
        Ok(employee)
    }

    pub async fn list(&self, actor: &Actor, pagination: Pagination) -> Result<Page<Employee>, DomainError> {
        let organization_id = actor.authorize_in_own_tenant(Action::ReadEmployees)?;
        self.employees.list(&organization_id, pagination).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, SubscriptionPlan, User};
    use crate::repositories::{MockEmployeeRepository, MockUserRepository};
    use crate::services::test_support;

    fn member(organization_id: Uuid) -> User {
        User::new(
            "Sam Lee".to_string(),
            "sam@acme.io".to_string(),
            "hash".to_string(),
            Role::Employee,
            Some(organization_id),
            None,
        )
        .unwrap()
    }

    fn input(user_id: Uuid) -> NewEmployee {
        NewEmployee {
            user_id,
            employee_code: "emp-007".to_string(),
            personal: PersonalInfo::default(),
            employment: EmploymentInfo::default(),
            bank: BankInfo::default(),
        }
    }

    fn users_returning(user: User) -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(move |_| Ok(Some(user.clone())));
        users
    }

    #[tokio::test]
    async fn test_create_employee_within_limit() {
        let org = test_support::organization(SubscriptionPlan::Free);
        let user = member(org.id);
        let user_id = user.id;

        let mut employees = MockEmployeeRepository::new();
        employees.expect_find_by_user_id().returning(|_| Ok(None));
        employees.expect_count_by_organization().returning(|_| Ok(4));
        employees.expect_create().returning(|e| Ok(e.clone()));

        let hr = test_support::actor(Role::Hr, org.id);
        let service = EmployeeService::new(
            Arc::new(employees),
            Arc::new(users_returning(user)),
            test_support::gate_for(org),
        );

        let employee = service.create(&hr, input(user_id)).await.unwrap();
        assert_eq!(employee.employee_code, "EMP-007");
        assert_eq!(employee.user_id, user_id);
    }

    #[tokio::test]
    async fn test_employee_limit_reached() {
        let org = test_support::organization(SubscriptionPlan::Free);
        let user = member(org.id);
        let user_id = user.id;

        let mut employees = MockEmployeeRepository::new();
        employees.expect_find_by_user_id().returning(|_| Ok(None));
        employees.expect_count_by_organization().returning(|_| Ok(5));
        employees.expect_create().never();

        let admin = test_support::actor(Role::Admin, org.id);
        let service = EmployeeService::new(
            Arc::new(employees),
            Arc::new(users_returning(user)),
            test_support::gate_for(org),
        );

        let result = service.create(&admin, input(user_id)).await;
        assert!(matches!(result, Err(DomainError::EmployeeLimitReached(5))));
    }

    #[tokio::test]
    async fn test_one_employee_per_user() {
        let org = test_support::organization(SubscriptionPlan::Pro);
        let user = member(org.id);
        let user_id = user.id;
        let existing = Employee::new(
            user_id,
            org.id,
            "EMP-001".to_string(),
            PersonalInfo::default(),
            EmploymentInfo::default(),
            BankInfo::default(),
            None,
        )
        .unwrap();

        let mut employees = MockEmployeeRepository::new();
        employees.expect_find_by_user_id().returning(move |_| Ok(Some(existing.clone())));
        employees.expect_create().never();

        let admin = test_support::actor(Role::Admin, org.id);
        let service = EmployeeService::new(
            Arc::new(employees),
            Arc::new(users_returning(user)),
            test_support::gate_for(org),
        );

        let result = service.create(&admin, input(user_id)).await;
        assert!(matches!(result, Err(DomainError::EmployeeAlreadyExists(id)) if id == user_id));
    }

    #[tokio::test]
    async fn test_cannot_enroll_user_from_another_organization() {
        let org = test_support::organization(SubscriptionPlan::Pro);
        let outsider = member(Uuid::new_v4());
        let outsider_id = outsider.id;

        let mut employees = MockEmployeeRepository::new();
        employees.expect_create().never();

        let admin = test_support::actor(Role::Admin, org.id);
        let service = EmployeeService::new(
            Arc::new(employees),
            Arc::new(users_returning(outsider)),
            test_support::gate_for(org),
        );

        let result = service.create(&admin, input(outsider_id)).await;
        assert!(matches!(result, Err(DomainError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_get_is_tenant_scoped() {
        let org_id = Uuid::new_v4();
        let employee = Employee::new(
            Uuid::new_v4(),
            org_id,
            "EMP-002".to_string(),
            PersonalInfo::default(),
            EmploymentInfo::default(),
            BankInfo::default(),
            None,
        )
        .unwrap();
        let employee_id = employee.id;

        let mut employees = MockEmployeeRepository::new();
        employees.expect_find_by_id().returning(move |_| Ok(Some(employee.clone())));
        let service = EmployeeService::new(
            Arc::new(employees),
            Arc::new(MockUserRepository::new()),
            test_support::unused_gate(),
        );

        let payroll = test_support::actor(Role::PayrollHr, org_id);
        assert!(service.get(&payroll, &employee_id).await.is_ok());

        let foreign_hr = test_support::actor(Role::Hr, Uuid::new_v4());
        assert!(matches!(
            service.get(&foreign_hr, &employee_id).await,
            Err(DomainError::Forbidden(_))
        ));
    }
}
