//! Tenant user administration

use std::sync::Arc;

use tracing::{info, warn};

use hrm_security::PasswordService;
use hrm_shared::constants::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use hrm_shared::utils::mask_email;

use crate::domain::{Role, User};
use crate::error::DomainError;
use crate::policy::{Action, Actor};
use crate::repositories::UserRepository;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Creates a user inside the caller's organization.
    pub async fn create_user(&self, actor: &Actor, input: NewUser) -> Result<User, DomainError> {
        let organization_id = actor.authorize_in_own_tenant(Action::ManageUsers)?;

        if input.role.is_platform() {
            return Err(DomainError::Forbidden(format!(
                "role '{}' cannot be granted inside an organization",
                input.role.as_str()
            )));
        }

        let length = input.password.chars().count();
        if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
            return Err(DomainError::ValidationError(format!(
                "Password must be between {} and {} characters",
                MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
            )));
        }

        let email = input.email.trim().to_lowercase();
        if self.user_repo.find_by_email(&email).await?.is_some() {
            warn!("User creation failed: email already exists: {}", mask_email(&email));
            return Err(DomainError::EmailAlreadyExists(email));
        }

        let password_hash = PasswordService::hash(&input.password)?;

        let user = User::new(
            input.name,
            email,
            password_hash,
            input.role,
            Some(organization_id),
            Some(actor.user_id),
        )?;
        let created = self.user_repo.create(&user).await?;

        info!(
            "User {} created in organization {} with role {}",
            created.id,
            organization_id,
            created.role.as_str()
        );
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;
    use crate::repositories::MockUserRepository;
    use crate::services::test_support;

    fn input(role: Role, password: &str) -> NewUser {
        NewUser {
            name: "John Smith".to_string(),
            email: "John@Acme.io".to_string(),
            password: password.to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_admin_creates_user_in_own_tenant() {
        let org_id = Uuid::new_v4();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .withf(move |u| u.organization_id == Some(org_id) && u.password_hash.starts_with("$argon2"))
            .returning(|u| Ok(u.clone()));

        let service = UserService::new(Arc::new(repo));
        let admin = test_support::actor(Role::Admin, org_id);
        let user = service.create_user(&admin, input(Role::Hr, "s3cure-pass")).await.unwrap();

        assert_eq!(user.email, "john@acme.io");
        assert_eq!(user.created_by, Some(admin.user_id));
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let org_id = Uuid::new_v4();
        let existing = User::new(
            "John Smith".to_string(),
            "john@acme.io".to_string(),
            "hash".to_string(),
            Role::Employee,
            Some(org_id),
            None,
        )
        .unwrap();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(move |_| Ok(Some(existing.clone())));
        repo.expect_create().never();

        let service = UserService::new(Arc::new(repo));
        let admin = test_support::actor(Role::Admin, org_id);
        let result = service.create_user(&admin, input(Role::Hr, "s3cure-pass")).await;
        assert!(matches!(result, Err(DomainError::EmailAlreadyExists(e)) if e == "john@acme.io"));
    }

    #[tokio::test]
    async fn test_rejects_platform_role_and_weak_password() {
        let service = UserService::new(Arc::new(MockUserRepository::new()));
        let admin = test_support::actor(Role::Admin, Uuid::new_v4());

        let result = service.create_user(&admin, input(Role::SuperAdmin, "s3cure-pass")).await;
        assert!(matches!(result, Err(DomainError::Forbidden(_))));

        let result = service.create_user(&admin, input(Role::Hr, "short")).await;
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_non_admin_cannot_create_users() {
        let service = UserService::new(Arc::new(MockUserRepository::new()));
        let manager = test_support::actor(Role::Manager, Uuid::new_v4());
        let result = service.create_user(&manager, input(Role::Employee, "s3cure-pass")).await;
        assert!(matches!(result, Err(DomainError::Forbidden(_))));
    }
}
