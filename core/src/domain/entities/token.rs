//! Token claims for JWT-based authentication and password recovery.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session token expiration time (7 days)
pub const SESSION_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Password-reset token expiration time (15 minutes)
pub const RESET_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// JWT issuer
pub const JWT_ISSUER: &str = "khidma";

/// JWT audience
pub const JWT_AUDIENCE: &str = "khidma-api";

/// Purpose discriminant embedded in every token
///
/// Session and reset tokens share the signing mechanism; the purpose claim
/// is what keeps one from standing in for the other. It is enforced by the
/// verifier and never trusted from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    Session,
    PasswordReset,
}

impl TokenPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenPurpose::Session => "session",
            TokenPurpose::PasswordReset => "password_reset",
        }
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// What the token may be used for
    pub purpose: TokenPurpose,

    /// Principal email (session tokens only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Principal role (session tokens only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Fingerprint of the password hash at issue time (reset tokens only)
    ///
    /// Changing the password changes the fingerprint, which is how a
    /// consumed reset token stops verifying without server-side state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pwd_fp: Option<String>,
}

impl Claims {
    /// Creates new claims for a session token
    pub fn new_session_token(
        principal_id: Uuid,
        email: String,
        role: String,
        expiry_seconds: i64,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(expiry_seconds);

        Self {
            sub: principal_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
            purpose: TokenPurpose::Session,
            email: Some(email),
            role: Some(role),
            pwd_fp: None,
        }
    }

    /// Creates new claims for a password-reset token
    pub fn new_reset_token(
        principal_id: Uuid,
        password_fingerprint: String,
        expiry_seconds: i64,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(expiry_seconds);

        Self {
            sub: principal_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
            purpose: TokenPurpose::PasswordReset,
            email: None,
            role: None,
            pwd_fp: Some(password_fingerprint),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }

    /// Checks if the claims are currently within their validity window
    pub fn is_valid(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.nbf && now < self.exp
    }

    /// Gets the principal ID from the claims
    pub fn principal_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token_claims() {
        let principal_id = Uuid::new_v4();
        let claims = Claims::new_session_token(
            principal_id,
            "ahmad@example.com".to_string(),
            "USER".to_string(),
            SESSION_TOKEN_EXPIRY_DAYS * 86400,
        );

        assert_eq!(claims.sub, principal_id.to_string());
        assert_eq!(claims.iss, JWT_ISSUER);
        assert_eq!(claims.aud, JWT_AUDIENCE);
        assert_eq!(claims.purpose, TokenPurpose::Session);
        assert_eq!(claims.email, Some("ahmad@example.com".to_string()));
        assert_eq!(claims.role, Some("USER".to_string()));
        assert!(claims.pwd_fp.is_none());
        assert!(claims.is_valid());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_reset_token_claims() {
        let principal_id = Uuid::new_v4();
        let claims = Claims::new_reset_token(
            principal_id,
            "fp".to_string(),
            RESET_TOKEN_EXPIRY_MINUTES * 60,
        );

        assert_eq!(claims.purpose, TokenPurpose::PasswordReset);
        assert!(claims.email.is_none());
        assert!(claims.role.is_none());
        assert_eq!(claims.pwd_fp, Some("fp".to_string()));
        assert!(claims.is_valid());
    }

    #[test]
    fn test_claims_principal_id_parsing() {
        let principal_id = Uuid::new_v4();
        let claims = Claims::new_reset_token(principal_id, "fp".to_string(), 900);

        assert_eq!(claims.principal_id().unwrap(), principal_id);
    }

    #[test]
    fn test_claims_expiration() {
        let mut claims = Claims::new_session_token(
            Uuid::new_v4(),
            "a@b.com".to_string(),
            "USER".to_string(),
            900,
        );

        claims.exp = Utc::now().timestamp() - 1;
        assert!(claims.is_expired());
        assert!(!claims.is_valid());
    }

    #[test]
    fn test_purpose_serialization() {
        let json = serde_json::to_string(&TokenPurpose::PasswordReset).unwrap();
        assert_eq!(json, "\"password_reset\"");
        let json = serde_json::to_string(&TokenPurpose::Session).unwrap();
        assert_eq!(json, "\"session\"");
    }

    #[test]
    fn test_session_claims_omit_reset_fields() {
        let claims = Claims::new_session_token(
            Uuid::new_v4(),
            "a@b.com".to_string(),
            "USER".to_string(),
            900,
        );
        let json = serde_json::to_string(&claims).unwrap();
        assert!(!json.contains("pwd_fp"));
    }
}
