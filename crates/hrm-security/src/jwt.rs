//! JWT token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use hrm_shared::constants::{TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
    #[error("Unexpected token type: {0}")]
    WrongTokenType(String),
}

/// Identity carried by every token. `role` is the serialized user role and
/// `org` is absent for platform-level users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    pub iat: i64,
    pub exp: i64,
    pub token_type: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, JwtError> {
        Uuid::parse_str(&self.sub).map_err(|e| JwtError::ValidationError(e.to_string()))
    }

    pub fn organization_id(&self) -> Result<Option<Uuid>, JwtError> {
        self.org
            .as_deref()
            .map(Uuid::parse_str)
            .transpose()
            .map_err(|e| JwtError::ValidationError(e.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_expiry: i64, refresh_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry: access_expiry,
            refresh_token_expiry: refresh_expiry,
        }
    }

    pub fn generate_pair(
        &self,
        user_id: &Uuid,
        role: &str,
        organization_id: Option<&Uuid>,
    ) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access_token: self.generate_token(
                user_id,
                role,
                organization_id,
                TOKEN_TYPE_ACCESS,
                self.access_token_expiry,
            )?,
            refresh_token: self.generate_token(
                user_id,
                role,
                organization_id,
                TOKEN_TYPE_REFRESH,
                self.refresh_token_expiry,
            )?,
            expires_in: self.access_token_expiry,
        })
    }

    fn generate_token(
        &self,
        user_id: &Uuid,
        role: &str,
        organization_id: Option<&Uuid>,
        token_type: &str,
        expiry: i64,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            org: organization_id.map(|id| id.to_string()),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expiry)).timestamp(),
            token_type: token_type.to_string(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::CreationError(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::ValidationError(e.to_string()),
            })
    }

    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_typed(token, TOKEN_TYPE_ACCESS)
    }

    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_typed(token, TOKEN_TYPE_REFRESH)
    }

    fn validate_typed(&self, token: &str, expected: &str) -> Result<Claims, JwtError> {
        let claims = self.validate_token(token)?;
        if claims.token_type != expected {
            return Err(JwtError::WrongTokenType(claims.token_type));
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret-with-enough-entropy", 900, 3600)
    }

    #[test]
    fn test_access_token_round_trip_carries_identity() {
        let svc = service();
        let user_id = Uuid::new_v4();
        let org_id = Uuid::new_v4();

        let pair = svc.generate_pair(&user_id, "admin", Some(&org_id)).unwrap();
        let claims = svc.validate_access_token(&pair.access_token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.organization_id().unwrap(), Some(org_id));
        assert_eq!(claims.role, "admin");
        assert_eq!(pair.expires_in, 900);
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let svc = service();
        let pair = svc.generate_pair(&Uuid::new_v4(), "superAdmin", None).unwrap();

        assert!(matches!(
            svc.validate_access_token(&pair.refresh_token),
            Err(JwtError::WrongTokenType(_))
        ));
        let claims = svc.validate_refresh_token(&pair.refresh_token).unwrap();
        assert_eq!(claims.organization_id().unwrap(), None);
    }

    #[test]
    fn test_rejects_foreign_signature() {
        let pair = service().generate_pair(&Uuid::new_v4(), "hr", None).unwrap();
        let other = JwtService::new("another-secret", 900, 3600);
        assert!(matches!(
            other.validate_token(&pair.access_token),
            Err(JwtError::ValidationError(_))
        ));
    }

    #[test]
    fn test_expired_token() {
        // Past the default 60s leeway.
        let svc = JwtService::new("test-secret", -120, -120);
        let pair = svc.generate_pair(&Uuid::new_v4(), "hr", None).unwrap();
        assert!(matches!(svc.validate_token(&pair.access_token), Err(JwtError::TokenExpired)));
    }
}
