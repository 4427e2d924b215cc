// ============================================================================
// HRM Core - Authentication Service
// File: crates/hrm-core/src/services/auth_service.rs
// ============================================================================
//! Authentication service with login, token refresh, and bearer identity
//! resolution

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use hrm_security::{JwtError, JwtService, PasswordService, TokenPair};
use hrm_shared::utils::mask_email;

use crate::domain::{Role, User};
use crate::error::DomainError;
use crate::policy::Actor;
use crate::repositories::UserRepository;

pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(user_repo: Arc<dyn UserRepository>, jwt: JwtService) -> Self {
        Self { user_repo, jwt }
    }

    /// Login with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, DomainError> {
        let masked = mask_email(email);
        info!("Login attempt for email: {}", masked);

        // 1. Find user by email
        let user = self
            .user_repo
            .find_by_email(&email.trim().to_lowercase())
            .await?
            .ok_or_else(|| {
                warn!("Login failed: email not found: {}", masked);
                DomainError::InvalidCredentials
            })?;

        // 2. Verify password before revealing account state
        let password_valid = PasswordService::verify(password, &user.password_hash).map_err(|e| {
            error!("Stored password hash for user {} is unusable: {}", user.id, e);
            DomainError::from(e)
        })?;
        if !password_valid {
            warn!("Login failed: invalid password for: {}", masked);
            return Err(DomainError::InvalidCredentials);
        }

        // 3. Check if user can login
        if !user.can_login() {
            warn!("Login failed: user {} is {}", user.id, user.status.as_str());
            return Err(DomainError::UserNotActive);
        }

        // 4. Issue tokens
        let tokens = self.issue(&user)?;

        // 5. Update last login
        let mut updated_user = user;
        updated_user.record_login();
        if let Err(e) = self.user_repo.update(&updated_user).await {
            // Login still succeeds.
            error!("Failed to update last login for {}: {}", updated_user.id, e);
        }

        info!("Login successful for: {}", masked);

        Ok(LoginResult {
            user: UserInfo::from(&updated_user),
            tokens,
        })
    }

    /// Exchanges a refresh token for a new pair. Role and organization are
    /// re-read from the store so revoked access does not outlive a refresh.
    pub async fn refresh(&self, refresh_token: &str) -> Result<LoginResult, DomainError> {
        let claims = self.jwt.validate_refresh_token(refresh_token).map_err(token_error)?;
        let user_id = claims.user_id().map_err(token_error)?;

        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| DomainError::InvalidToken("unknown subject".to_string()))?;

        if !user.can_login() {
            warn!("Refresh rejected: user {} is {}", user.id, user.status.as_str());
            return Err(DomainError::UserNotActive);
        }

        let tokens = self.issue(&user)?;
        info!("Tokens refreshed for user: {}", user.id);

        Ok(LoginResult {
            user: UserInfo::from(&user),
            tokens,
        })
    }

    /// Resolves a bearer access token into the calling identity.
    pub fn authenticate(&self, access_token: &str) -> Result<Actor, DomainError> {
        let claims = self.jwt.validate_access_token(access_token).map_err(token_error)?;
        let user_id = claims.user_id().map_err(token_error)?;
        let organization_id = claims.organization_id().map_err(token_error)?;
        let role = Role::from_str(&claims.role)
            .ok_or_else(|| DomainError::InvalidToken(format!("unknown role '{}'", claims.role)))?;

        Ok(Actor::new(user_id, role, organization_id))
    }

    fn issue(&self, user: &User) -> Result<TokenPair, DomainError> {
        self.jwt
            .generate_pair(&user.id, user.role.as_str(), user.organization_id.as_ref())
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))
    }
}

fn token_error(e: JwtError) -> DomainError {
    DomainError::InvalidToken(e.to_string())
}

/// Result of successful login or refresh
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: UserInfo,
    pub tokens: TokenPair,
}

/// User info returned in auth responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub organization_id: Option<Uuid>,
    pub status: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            organization_id: user.organization_id,
            status: user.status.as_str().to_string(),
        }
    }
}
