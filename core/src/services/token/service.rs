//! Main token service implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha256};

use crate::domain::entities::principal::Principal;
use crate::domain::entities::token::{Claims, TokenPurpose};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Service for minting and verifying session and password-reset tokens
///
/// Both flavors are HS256 JWTs; the purpose claim is what separates
/// them and is checked here, never trusted from the caller. Reset tokens
/// additionally carry a fingerprint of the password hash they were minted
/// against, which is how one password change invalidates every
/// outstanding reset token for that principal.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Session token lifetime in seconds, for response payloads
    pub fn session_expiry_seconds(&self) -> i64 {
        self.config.session_expiry_seconds
    }

    /// Mints a session token for an authenticated principal
    pub fn issue_session_token(&self, principal: &Principal) -> Result<String, DomainError> {
        let claims = Claims::new_session_token(
            principal.id,
            principal.email.clone(),
            principal.role.clone(),
            self.config.session_expiry_seconds,
        );
        self.encode_jwt(&claims)
    }

    /// Mints a short-lived password-reset token
    ///
    /// The token is bound to the principal's current password hash; it
    /// stops verifying the moment the password changes.
    pub fn issue_reset_token(&self, principal: &Principal) -> Result<String, DomainError> {
        let claims = Claims::new_reset_token(
            principal.id,
            Self::password_fingerprint(&principal.password_hash),
            self.config.reset_expiry_seconds,
        );
        self.encode_jwt(&claims)
    }

    /// Verifies a token's signature and time window
    ///
    /// Every decode failure (bad signature, expiry, malformed payload,
    /// wrong issuer or audience) collapses into `InvalidOrExpired` so the
    /// caller learns nothing about which check failed. The concrete reason
    /// is kept at debug level.
    pub fn verify_token(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|error| {
                tracing::debug!(
                    error = %error,
                    event = "token_rejected",
                    "Token failed verification"
                );
                DomainError::Token(TokenError::InvalidOrExpired)
            })
    }

    /// Verifies a session token
    pub fn verify_session_token(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = self.verify_token(token)?;
        if claims.purpose != TokenPurpose::Session {
            return Err(DomainError::Token(TokenError::WrongPurpose));
        }
        Ok(claims)
    }

    /// Verifies a password-reset token
    pub fn verify_reset_token(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = self.verify_token(token)?;
        if claims.purpose != TokenPurpose::PasswordReset {
            return Err(DomainError::Token(TokenError::WrongPurpose));
        }
        Ok(claims)
    }

    /// SHA-256 fingerprint of a password hash, embedded in reset tokens
    pub fn password_fingerprint(password_hash: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(password_hash.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Encodes claims into a JWT
    fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::GenerationFailed))
    }
}
