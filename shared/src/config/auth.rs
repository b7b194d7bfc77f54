//! Authentication and token configuration

use serde::{Deserialize, Serialize};

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Session token expiry time in seconds
    pub session_token_expiry: i64,

    /// Password-reset token expiry time in seconds
    pub reset_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("your-secret-key-change-in-production"),
            session_token_expiry: 604800, // 7 days
            reset_token_expiry: 900,      // 15 minutes
            issuer: String::from("khidma"),
            audience: String::from("khidma-api"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables
    ///
    /// Reads `JWT_SECRET`, `JWT_SESSION_EXPIRY_SECONDS` and
    /// `JWT_RESET_EXPIRY_SECONDS`, falling back to defaults for anything
    /// missing or malformed.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
            session_token_expiry: std::env::var("JWT_SESSION_EXPIRY_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.session_token_expiry),
            reset_token_expiry: std::env::var("JWT_RESET_EXPIRY_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.reset_token_expiry),
            issuer: defaults.issuer,
            audience: defaults.audience,
        }
    }

    /// Set session token expiry in days
    pub fn with_session_expiry_days(mut self, days: i64) -> Self {
        self.session_token_expiry = days * 86400;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "your-secret-key-change-in-production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = JwtConfig::default();
        assert_eq!(config.session_token_expiry, 7 * 24 * 60 * 60);
        assert_eq!(config.reset_token_expiry, 15 * 60);
        assert_eq!(config.issuer, "khidma");
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_with_session_expiry_days() {
        let config = JwtConfig::new("test-secret").with_session_expiry_days(1);
        assert_eq!(config.session_token_expiry, 86400);
        assert!(!config.is_using_default_secret());
    }
}
