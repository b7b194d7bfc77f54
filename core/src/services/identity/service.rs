//! Main identity service implementation

use std::sync::Arc;
use uuid::Uuid;

use khidma_shared::utils::masking::{is_email, is_valid_email, mask_identifier};

use crate::domain::entities::otp_challenge::ChallengeKind;
use crate::domain::entities::principal::{ActorKind, Principal};
use crate::domain::value_objects::{AuthResponse, RegisterRequest};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::{ChallengeRepository, PrincipalRepository};
use crate::services::challenge::{ChallengeService, CodeGenerator};
use crate::services::clock::Clock;
use crate::services::notifier::Notifier;
use crate::services::token::TokenService;

use super::config::IdentityServiceConfig;

/// Identity service orchestrating registration, login, and recovery
///
/// One instance serves one actor class; the end-user and administrator
/// services are the same type wired to different stores.
pub struct IdentityService<P, R, N, G, C>
where
    P: PrincipalRepository,
    R: ChallengeRepository,
    N: Notifier,
    G: CodeGenerator,
    C: Clock,
{
    /// Actor class this instance serves, used for log context
    actor: ActorKind,
    /// Principal repository for credential persistence
    principal_repository: Arc<P>,
    /// Challenge manager for OTP issue and verification
    challenge_service: Arc<ChallengeService<R, N, G, C>>,
    /// Token service for session and reset tokens
    token_service: Arc<TokenService>,
    /// Notifier for welcome messages
    notifier: Arc<N>,
    /// Service configuration
    config: IdentityServiceConfig,
}

impl<P, R, N, G, C> IdentityService<P, R, N, G, C>
where
    P: PrincipalRepository,
    R: ChallengeRepository,
    N: Notifier,
    G: CodeGenerator,
    C: Clock,
{
    /// Create a new identity service for one actor class
    pub fn new(
        actor: ActorKind,
        principal_repository: Arc<P>,
        challenge_service: Arc<ChallengeService<R, N, G, C>>,
        token_service: Arc<TokenService>,
        notifier: Arc<N>,
        config: IdentityServiceConfig,
    ) -> Self {
        Self {
            actor,
            principal_repository,
            challenge_service,
            token_service,
            notifier,
            config,
        }
    }

    /// Register a new principal and issue both verification challenges
    ///
    /// Registration is idempotent for abandoned signups: when the email or
    /// phone belongs to an existing principal that never finished
    /// verification, the existing record is returned unchanged and no new
    /// challenges are issued; the client resends explicitly, which keeps
    /// the resend cooldown meaningful. A fully verified holder of either
    /// identifier makes the call fail with `DuplicatePrincipal`, and the
    /// storage layer's unique index is the authoritative backstop for the
    /// race two concurrent registrations can create.
    pub async fn register(&self, request: RegisterRequest) -> DomainResult<Principal> {
        if request.password.len() < self.config.min_password_length {
            return Err(DomainError::ValidationErr(ValidationError::PasswordTooShort {
                min: self.config.min_password_length,
            }));
        }
        if !is_valid_email(&request.email) {
            return Err(DomainError::ValidationErr(ValidationError::InvalidFormat {
                field: "email".to_string(),
            }));
        }

        let existing = match self
            .principal_repository
            .find_by_email_or_phone(&request.email)
            .await?
        {
            Some(principal) => Some(principal),
            None => {
                self.principal_repository
                    .find_by_email_or_phone(&request.phone)
                    .await?
            }
        };

        if let Some(existing) = existing {
            if existing.is_fully_verified() {
                return Err(DomainError::Auth(AuthError::DuplicatePrincipal));
            }
            tracing::info!(
                actor = self.actor.as_str(),
                principal_id = %existing.id,
                event = "registration_resumed",
                "Registration repeated for an unverified principal"
            );
            return Ok(existing);
        }

        let password_hash = self.hash_password(&request.password)?;
        let principal = Principal::new(
            request.name,
            request.email,
            request.phone,
            password_hash,
            request.role,
        );
        let principal = self.principal_repository.create(principal).await?;

        tracing::info!(
            actor = self.actor.as_str(),
            principal_id = %principal.id,
            email = %mask_identifier(&principal.email),
            event = "principal_registered",
            "Registered new principal"
        );

        // Two independent challenges, one per channel
        self.challenge_service
            .issue(
                principal.id,
                &principal.email,
                ChallengeKind::EmailVerification,
                None,
            )
            .await?;
        self.challenge_service
            .issue(
                principal.id,
                &principal.phone,
                ChallengeKind::PhoneVerification,
                None,
            )
            .await?;

        Ok(principal)
    }

    /// Authenticate a principal and mint a session token
    ///
    /// An unknown identifier and a wrong password produce the identical
    /// `InvalidCredentials` failure so the response shape never reveals
    /// which half was wrong.
    pub async fn login(&self, identifier: &str, password: &str) -> DomainResult<AuthResponse> {
        let principal = self
            .principal_repository
            .find_by_email_or_phone(identifier)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidCredentials))?;

        let password_ok = bcrypt::verify(password, &principal.password_hash)
            .map_err(|error| DomainError::Internal {
                message: format!("Password verification failed: {}", error),
            })?;
        if !password_ok {
            tracing::warn!(
                actor = self.actor.as_str(),
                identifier = %mask_identifier(identifier),
                event = "login_rejected",
                "Login attempt with wrong password"
            );
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        if !principal.is_fully_verified() {
            return Err(DomainError::Auth(AuthError::AccountNotVerified));
        }

        if !principal.is_active() {
            return Err(DomainError::Auth(AuthError::AccountDisabled));
        }

        let access_token = self.token_service.issue_session_token(&principal)?;

        tracing::info!(
            actor = self.actor.as_str(),
            principal_id = %principal.id,
            event = "login_succeeded",
            "Principal logged in"
        );

        Ok(AuthResponse::new(
            access_token,
            self.token_service.session_expiry_seconds(),
            principal,
        ))
    }

    /// Verify a code and flip the matching verification flag
    ///
    /// Completing the second flag fires a best-effort welcome message;
    /// delivery failure never fails the call.
    pub async fn verify_otp(
        &self,
        target: &str,
        kind: ChallengeKind,
        code: &str,
        caller_ip: Option<&str>,
    ) -> DomainResult<bool> {
        let principal_id = self
            .challenge_service
            .verify(target, kind, code, caller_ip)
            .await?;

        if let Some(mut principal) = self.principal_repository.find_by_id(principal_id).await? {
            let was_fully_verified = principal.is_fully_verified();

            match kind {
                ChallengeKind::EmailVerification => principal.verify_email(),
                ChallengeKind::PhoneVerification => principal.verify_phone(),
                // reset codes are consumed by the recovery flow, no flag to flip
                ChallengeKind::PasswordReset => return Ok(true),
            }

            let principal = self.principal_repository.update(principal).await?;

            if principal.is_fully_verified() && !was_fully_verified {
                if let Err(error) = self
                    .notifier
                    .send_welcome(&principal.email, &principal.name)
                    .await
                {
                    tracing::warn!(
                        actor = self.actor.as_str(),
                        principal_id = %principal.id,
                        error = %error,
                        event = "welcome_delivery_failed",
                        "Failed to deliver welcome message"
                    );
                }
            }
        }

        Ok(true)
    }

    /// Re-issue a challenge after confirming the principal owns the target
    pub async fn resend_otp(
        &self,
        target: &str,
        kind: ChallengeKind,
        ip_address: Option<String>,
    ) -> DomainResult<bool> {
        let principal = self
            .principal_repository
            .find_by_email_or_phone(target)
            .await?
            .ok_or(DomainError::Auth(AuthError::PrincipalNotFound))?;

        let owns_target = match kind {
            ChallengeKind::EmailVerification => principal.email == target,
            ChallengeKind::PhoneVerification => principal.phone == target,
            ChallengeKind::PasswordReset => {
                principal.email == target || principal.phone == target
            }
        };
        if !owns_target {
            return Err(DomainError::Auth(AuthError::PrincipalNotFound));
        }

        self.challenge_service
            .issue(principal.id, target, kind, ip_address)
            .await?;

        Ok(true)
    }

    /// Start password recovery by issuing a reset challenge
    ///
    /// The code goes to whichever channel the identifier matched.
    pub async fn forgot_password(
        &self,
        identifier: &str,
        ip_address: Option<String>,
    ) -> DomainResult<bool> {
        let principal = self
            .principal_repository
            .find_by_email_or_phone(identifier)
            .await?
            .ok_or(DomainError::Auth(AuthError::PrincipalNotFound))?;

        let target = if is_email(identifier) {
            principal.email.clone()
        } else {
            principal.phone.clone()
        };

        self.challenge_service
            .issue(
                principal.id,
                &target,
                ChallengeKind::PasswordReset,
                ip_address,
            )
            .await?;

        tracing::info!(
            actor = self.actor.as_str(),
            principal_id = %principal.id,
            event = "password_reset_requested",
            "Issued password-reset challenge"
        );

        Ok(true)
    }

    /// Exchange a verified reset code for a short-lived reset token
    pub async fn verify_password_reset_otp(
        &self,
        target: &str,
        code: &str,
        caller_ip: Option<&str>,
    ) -> DomainResult<String> {
        let principal_id = self
            .challenge_service
            .verify(target, ChallengeKind::PasswordReset, code, caller_ip)
            .await?;

        let principal = self
            .principal_repository
            .find_by_id(principal_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::PrincipalNotFound))?;

        let reset_token = self.token_service.issue_reset_token(&principal)?;

        tracing::info!(
            actor = self.actor.as_str(),
            principal_id = %principal.id,
            event = "reset_token_issued",
            "Issued password-reset token"
        );

        Ok(reset_token)
    }

    /// Replace the password using a reset token
    ///
    /// Signature, expiry, purpose, and the password-hash binding are all
    /// reported to the caller as the same `InvalidOrExpired` failure.
    pub async fn reset_password(
        &self,
        reset_token: &str,
        new_password: &str,
    ) -> DomainResult<bool> {
        let claims = self
            .token_service
            .verify_reset_token(reset_token)
            .map_err(|error| match error {
                DomainError::Token(TokenError::WrongPurpose) => {
                    DomainError::Token(TokenError::InvalidOrExpired)
                }
                other => other,
            })?;

        if new_password.len() < self.config.min_password_length {
            return Err(DomainError::ValidationErr(ValidationError::PasswordTooShort {
                min: self.config.min_password_length,
            }));
        }

        let principal_id = claims
            .principal_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidOrExpired))?;
        let mut principal = self
            .principal_repository
            .find_by_id(principal_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::PrincipalNotFound))?;

        // One use only: the token carries a fingerprint of the hash it was
        // minted against, so a token that already reset the password no
        // longer matches
        let current_fingerprint = TokenService::password_fingerprint(&principal.password_hash);
        if claims.pwd_fp.as_deref() != Some(current_fingerprint.as_str()) {
            tracing::warn!(
                actor = self.actor.as_str(),
                principal_id = %principal.id,
                event = "reset_token_replayed",
                "Reset token no longer matches the current password hash"
            );
            return Err(DomainError::Token(TokenError::InvalidOrExpired));
        }

        let password_hash = self.hash_password(new_password)?;
        principal.set_password_hash(password_hash);
        self.principal_repository.update(principal).await?;

        tracing::info!(
            actor = self.actor.as_str(),
            principal_id = %principal_id,
            event = "password_reset",
            "Password replaced via reset token"
        );

        Ok(true)
    }

    /// Replace the password for an authenticated principal
    pub async fn change_password(
        &self,
        principal_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<bool> {
        let mut principal = self
            .principal_repository
            .find_by_id(principal_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::PrincipalNotFound))?;

        let password_ok = bcrypt::verify(current_password, &principal.password_hash)
            .map_err(|error| DomainError::Internal {
                message: format!("Password verification failed: {}", error),
            })?;
        if !password_ok {
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        if new_password.len() < self.config.min_password_length {
            return Err(DomainError::ValidationErr(ValidationError::PasswordTooShort {
                min: self.config.min_password_length,
            }));
        }

        let password_hash = self.hash_password(new_password)?;
        principal.set_password_hash(password_hash);
        self.principal_repository.update(principal).await?;

        tracing::info!(
            actor = self.actor.as_str(),
            principal_id = %principal_id,
            event = "password_changed",
            "Password replaced by authenticated principal"
        );

        Ok(true)
    }

    /// Purge challenges long past expiry
    pub async fn cleanup_expired_otps(&self) -> DomainResult<u64> {
        self.challenge_service.cleanup_expired().await
    }

    /// Hash a password with the configured bcrypt cost
    fn hash_password(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.config.bcrypt_cost).map_err(|error| DomainError::Internal {
            message: format!("Password hashing failed: {}", error),
        })
    }
}
