//! Configuration management

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub mail: MailSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub cors_origin: String,
    /// Upper bound on handling a single request.
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    /// Seconds.
    pub access_token_expiry: i64,
    /// Seconds.
    pub refresh_token_expiry: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MailSettings {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub use_tls: bool,
    pub from_address: String,
    pub from_name: Option<String>,
}

impl AppConfig {
    /// Layers built-in defaults, `config/default.toml`, `config/{APP_ENV}.toml`
    /// and `__`-separated environment variables, in that order.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "hrm-server")?
            .set_default("app.cors_origin", "http://localhost:5173")?
            .set_default("app.request_timeout_secs", 30)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("jwt.access_token_expiry", crate::constants::DEFAULT_ACCESS_TOKEN_EXPIRY)?
            .set_default("jwt.refresh_token_expiry", crate::constants::DEFAULT_REFRESH_TOKEN_EXPIRY)?
            .set_default("mail.smtp_port", 587)?
            .set_default("mail.use_tls", true)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;

        let settings: AppConfig = config.try_deserialize()?;
        settings.check()?;
        Ok(settings)
    }

    fn check(&self) -> Result<(), AppError> {
        if self.database.url.trim().is_empty() {
            return Err(AppError::InvalidConfig("database.url is required".to_string()));
        }
        if self.jwt.secret.trim().is_empty() {
            return Err(AppError::InvalidConfig("jwt.secret is required".to_string()));
        }
        if self.app.request_timeout_secs == 0 {
            return Err(AppError::InvalidConfig("app.request_timeout_secs must be positive".to_string()));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(AppError::InvalidConfig(
                "database.min_connections exceeds max_connections".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AppConfig {
        AppConfig {
            app: AppSettings {
                env: "test".to_string(),
                host: "127.0.0.1".to_string(),
                port: 8080,
                name: "hrm-server".to_string(),
                cors_origin: "http://localhost:5173".to_string(),
                request_timeout_secs: 30,
            },
            database: DatabaseSettings {
                url: "postgres://localhost/hrm".to_string(),
                max_connections: 5,
                min_connections: 1,
            },
            jwt: JwtSettings {
                secret: "secret".to_string(),
                access_token_expiry: 900,
                refresh_token_expiry: 3600,
            },
            mail: MailSettings {
                smtp_host: "localhost".to_string(),
                smtp_port: 1025,
                smtp_username: None,
                smtp_password: None,
                use_tls: false,
                from_address: "billing@hrm.local".to_string(),
                from_name: None,
            },
        }
    }

    #[test]
    fn test_check_accepts_complete_settings() {
        assert!(sample().check().is_ok());
    }

    #[test]
    fn test_check_rejects_blank_secret() {
        let mut config = sample();
        config.jwt.secret = "  ".to_string();
        assert!(matches!(config.check(), Err(AppError::InvalidConfig(_))));
    }

    #[test]
    fn test_check_rejects_inverted_pool_bounds() {
        let mut config = sample();
        config.database.min_connections = 10;
        assert!(config.check().is_err());
    }

    #[test]
    fn test_check_rejects_zero_timeout() {
        let mut config = sample();
        config.app.request_timeout_secs = 0;
        assert!(matches!(config.check(), Err(AppError::InvalidConfig(msg)) if msg.contains("request_timeout_secs")));
    }
}
