//! Main challenge manager implementation

use chrono::Duration;
use constant_time_eq::constant_time_eq;
use std::sync::Arc;
use uuid::Uuid;

use khidma_shared::utils::masking::mask_identifier;

use crate::domain::entities::otp_challenge::{ChallengeKind, OtpChallenge};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::ChallengeRepository;
use crate::services::clock::Clock;
use crate::services::notifier::{Channel, Notifier};

use super::code_generator::CodeGenerator;
use super::config::ChallengeServiceConfig;

/// Challenge manager: issues, verifies, and expires one-time codes
///
/// The manager is the only writer of challenge state. Verification
/// short-circuits in a fixed order (missing/expired, attempt ceiling,
/// throttle window, code comparison, IP pinning) so counters and
/// timestamps stay consistent regardless of the eventual outcome.
pub struct ChallengeService<R, N, G, C>
where
    R: ChallengeRepository,
    N: Notifier,
    G: CodeGenerator,
    C: Clock,
{
    /// Challenge repository for persistence
    repository: Arc<R>,
    /// Notifier for code delivery
    notifier: Arc<N>,
    /// Code source
    code_generator: Arc<G>,
    /// Time source
    clock: Arc<C>,
    /// Service configuration
    config: ChallengeServiceConfig,
}

impl<R, N, G, C> ChallengeService<R, N, G, C>
where
    R: ChallengeRepository,
    N: Notifier,
    G: CodeGenerator,
    C: Clock,
{
    /// Create a new challenge manager
    pub fn new(
        repository: Arc<R>,
        notifier: Arc<N>,
        code_generator: Arc<G>,
        clock: Arc<C>,
        config: ChallengeServiceConfig,
    ) -> Self {
        Self {
            repository,
            notifier,
            code_generator,
            clock,
            config,
        }
    }

    /// Issue a new challenge and hand the code to the notifier
    ///
    /// Enforces the resend cooldown: if any challenge for the same
    /// `(target, kind)` was created within the cooldown window the call
    /// fails and nothing is persisted. Delivery failure does not fail the
    /// call: the challenge is already durable and a resend is possible.
    ///
    /// # Arguments
    ///
    /// * `principal_id` - Owner of the challenge
    /// * `target` - Email or phone the code is sent to
    /// * `kind` - Purpose of the challenge
    /// * `ip_address` - Client IP to pin, if known
    ///
    /// # Returns
    ///
    /// * `Ok(OtpChallenge)` - The persisted challenge
    /// * `Err(DomainError)` - Cooldown violation or storage error
    pub async fn issue(
        &self,
        principal_id: Uuid,
        target: &str,
        kind: ChallengeKind,
        ip_address: Option<String>,
    ) -> DomainResult<OtpChallenge> {
        let now = self.clock.now();
        let since = now - Duration::seconds(self.config.resend_cooldown_seconds);

        if self.repository.find_recent(target, kind, since).await?.is_some() {
            tracing::warn!(
                recipient = %mask_identifier(target),
                kind = kind.as_str(),
                event = "otp_resend_cooldown",
                "Challenge requested again inside the cooldown window"
            );
            return Err(DomainError::Auth(AuthError::TooManyResendRequests));
        }

        let code = self.code_generator.generate();
        let challenge = OtpChallenge::issued_at(
            principal_id,
            target.to_string(),
            kind,
            code,
            ip_address,
            now,
            self.config.code_expiration_minutes,
        );
        let challenge = self.repository.create(challenge).await?;

        tracing::info!(
            recipient = %mask_identifier(target),
            kind = kind.as_str(),
            challenge_id = %challenge.id,
            event = "otp_issued",
            "Issued new verification challenge"
        );

        let channel = Channel::for_challenge(kind, target);
        if let Err(error) = self
            .notifier
            .send_code(channel, target, &challenge.code, kind)
            .await
        {
            // Best effort: the challenge is durable, a resend stays possible
            tracing::warn!(
                recipient = %mask_identifier(target),
                kind = kind.as_str(),
                error = %error,
                event = "otp_delivery_failed",
                "Failed to deliver verification code"
            );
        }

        Ok(challenge)
    }

    /// Verify a code against the newest outstanding challenge
    ///
    /// # Arguments
    ///
    /// * `target` - Email or phone the code was sent to
    /// * `kind` - Purpose of the challenge
    /// * `code` - The code to check
    /// * `caller_ip` - Client IP of the verification request, if known
    ///
    /// # Returns
    ///
    /// * `Ok(Uuid)` - The owning principal's id
    /// * `Err(DomainError)` - One of the guard or mismatch failures
    pub async fn verify(
        &self,
        target: &str,
        kind: ChallengeKind,
        code: &str,
        caller_ip: Option<&str>,
    ) -> DomainResult<Uuid> {
        let now = self.clock.now();

        let Some(mut challenge) = self.repository.find_usable(target, kind, now).await? else {
            tracing::warn!(
                recipient = %mask_identifier(target),
                kind = kind.as_str(),
                event = "otp_missing",
                "No outstanding challenge for verification attempt"
            );
            return Err(DomainError::Auth(AuthError::ChallengeExpiredOrMissing));
        };

        if challenge.attempt_count >= self.config.max_attempts {
            tracing::warn!(
                recipient = %mask_identifier(target),
                challenge_id = %challenge.id,
                event = "otp_attempt_ceiling",
                "Challenge locked after too many failed attempts"
            );
            return Err(DomainError::Auth(AuthError::TooManyAttempts));
        }

        if challenge.is_throttled_at(now, self.config.verify_throttle_seconds) {
            tracing::warn!(
                recipient = %mask_identifier(target),
                challenge_id = %challenge.id,
                event = "otp_throttled",
                "Verification attempt inside the throttle window"
            );
            return Err(DomainError::Auth(AuthError::Throttled));
        }

        if !constant_time_eq(challenge.code.as_bytes(), code.as_bytes()) {
            challenge.record_failed_attempt(now);
            let remaining = challenge.remaining_attempts();
            self.repository.update(challenge).await?;

            tracing::warn!(
                recipient = %mask_identifier(target),
                remaining_attempts = remaining,
                event = "otp_code_mismatch",
                "Verification code did not match"
            );
            return Err(DomainError::Auth(AuthError::InvalidCode));
        }

        // IP pinning is checked after the code so a mismatch never burns
        // an attempt the caller did not spend guessing
        if challenge.ip_mismatch(caller_ip) {
            tracing::warn!(
                recipient = %mask_identifier(target),
                challenge_id = %challenge.id,
                event = "otp_ip_mismatch",
                "Verification request came from a different address"
            );
            return Err(DomainError::Auth(AuthError::IpMismatch));
        }

        challenge.mark_used();
        let challenge = self.repository.update(challenge).await?;

        tracing::info!(
            recipient = %mask_identifier(target),
            kind = kind.as_str(),
            challenge_id = %challenge.id,
            event = "otp_verified",
            "Verification code accepted"
        );

        Ok(challenge.principal_id)
    }

    /// Remove challenges whose expiry is older than the purge window
    ///
    /// Pure hygiene; correctness never depends on this running.
    pub async fn cleanup_expired(&self) -> DomainResult<u64> {
        let cutoff = self.clock.now() - Duration::hours(self.config.purge_after_hours);
        let removed = self.repository.purge_older_than(cutoff).await?;

        if removed > 0 {
            tracing::info!(
                removed = removed,
                event = "otp_purge",
                "Purged expired verification challenges"
            );
        }

        Ok(removed)
    }
}
