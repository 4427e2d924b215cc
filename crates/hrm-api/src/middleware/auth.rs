//! Bearer-token authentication

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::debug;

use hrm_core::services::AuthService;
use hrm_core::Actor;

use crate::error::ApiError;

/// Authenticated caller resolved from `Authorization: Bearer <token>`.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Actor);

impl<S> FromRequestParts<S> for AuthUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

        let auth = Arc::<AuthService>::from_ref(state);
        let actor = auth.authenticate(token).map_err(|e| {
            debug!("Bearer token rejected: {}", e);
            ApiError::Unauthorized("Invalid or expired token".to_string())
        })?;

        Ok(AuthUser(actor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{body::Body, http::Request, http::StatusCode, routing::get, Router};
    use tower::ServiceExt;
    use uuid::Uuid;

    use hrm_core::domain::User;
    use hrm_core::repositories::UserRepository;
    use hrm_core::DomainError;
    use hrm_security::JwtService;

    struct NoUsers;

    #[async_trait]
    impl UserRepository for NoUsers {
        async fn find_by_id(&self, _id: &Uuid) -> Result<Option<User>, DomainError> {
            Ok(None)
        }
        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, DomainError> {
            Ok(None)
        }
        async fn create(&self, user: &User) -> Result<User, DomainError> {
            Ok(user.clone())
        }
        async fn update(&self, user: &User) -> Result<User, DomainError> {
            Ok(user.clone())
        }
    }

    fn jwt() -> JwtService {
        JwtService::new("extractor-test-secret", 900, 3600)
    }

    async fn whoami(AuthUser(actor): AuthUser) -> String {
        actor.role.as_str().to_string()
    }

    fn app() -> Router {
        let auth = Arc::new(AuthService::new(Arc::new(NoUsers), jwt()));
        Router::new().route("/whoami", get(whoami)).with_state(auth)
    }

    async fn call(authorization: Option<String>) -> (StatusCode, String) {
        let mut request = Request::builder().uri("/whoami");
        if let Some(value) = authorization {
            request = request.header(AUTHORIZATION, value);
        }
        let response = app()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_valid_access_token() {
        let pair = jwt().generate_pair(&Uuid::new_v4(), "manager", Some(&Uuid::new_v4())).unwrap();
        let (status, body) = call(Some(format!("Bearer {}", pair.access_token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "manager");
    }

    #[tokio::test]
    async fn test_missing_token() {
        let (status, body) = call(None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("\"success\":false"));
    }

    #[tokio::test]
    async fn test_refresh_token_is_not_accepted() {
        let pair = jwt().generate_pair(&Uuid::new_v4(), "admin", None).unwrap();
        let (status, _) = call(Some(format!("Bearer {}", pair.refresh_token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_garbage_token() {
        let (status, _) = call(Some("Bearer not-a-jwt".to_string())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
