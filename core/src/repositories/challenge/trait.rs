//! Challenge repository trait defining the interface for OTP persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::otp_challenge::{ChallengeKind, OtpChallenge};
use crate::errors::DomainError;

/// Repository trait for OtpChallenge persistence operations
///
/// Challenges are append-mostly: rows are created on issue, mutated only
/// by the challenge manager during verification, and removed solely by
/// the periodic purge. Multiple usable rows may coexist for one
/// `(target, kind)` pair; selection is always "most recently created".
#[async_trait]
pub trait ChallengeRepository: Send + Sync {
    /// Persist a new challenge
    async fn create(&self, challenge: OtpChallenge) -> Result<OtpChallenge, DomainError>;

    /// Persist attempt-counter or consumption updates to a challenge
    async fn update(&self, challenge: OtpChallenge) -> Result<OtpChallenge, DomainError>;

    /// Find the most recently created unconsumed, unexpired challenge
    ///
    /// The attempt ceiling is deliberately not part of the selection: the
    /// challenge manager enforces it so a locked challenge is reported as
    /// `TooManyAttempts` rather than as missing. When several challenges
    /// coexist (rapid resends across concurrency boundaries), the newest
    /// one wins deterministically.
    async fn find_usable(
        &self,
        target: &str,
        kind: ChallengeKind,
        now: DateTime<Utc>,
    ) -> Result<Option<OtpChallenge>, DomainError>;

    /// Find any challenge for the target created strictly after `since`
    ///
    /// Backs the resend cooldown; consumption and attempt state are
    /// irrelevant here, only creation time matters.
    async fn find_recent(
        &self,
        target: &str,
        kind: ChallengeKind,
        since: DateTime<Utc>,
    ) -> Result<Option<OtpChallenge>, DomainError>;

    /// Delete challenges whose expiry predates `cutoff`
    ///
    /// # Returns
    /// The number of rows removed
    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError>;
}
