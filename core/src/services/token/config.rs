//! Configuration for the token service

use crate::domain::entities::token::{
    JWT_AUDIENCE, JWT_ISSUER, RESET_TOKEN_EXPIRY_MINUTES, SESSION_TOKEN_EXPIRY_DAYS,
};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Secret for HS256 signing
    pub jwt_secret: String,
    /// Session token lifetime in seconds
    pub session_expiry_seconds: i64,
    /// Password-reset token lifetime in seconds
    pub reset_expiry_seconds: i64,
    /// Issuer claim
    pub issuer: String,
    /// Audience claim
    pub audience: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::from("your-secret-key-change-in-production"),
            session_expiry_seconds: SESSION_TOKEN_EXPIRY_DAYS * 86400,
            reset_expiry_seconds: RESET_TOKEN_EXPIRY_MINUTES * 60,
            issuer: JWT_ISSUER.to_string(),
            audience: JWT_AUDIENCE.to_string(),
        }
    }
}

impl TokenServiceConfig {
    /// Create a configuration with an explicit secret
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Default::default()
        }
    }
}

impl From<khidma_shared::config::JwtConfig> for TokenServiceConfig {
    fn from(config: khidma_shared::config::JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret,
            session_expiry_seconds: config.session_token_expiry,
            reset_expiry_seconds: config.reset_token_expiry,
            issuer: config.issuer,
            audience: config.audience,
        }
    }
}
