//! One-time-code challenge entity for identity verification and recovery.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the verification code
pub const CODE_LENGTH: usize = 4;

/// Maximum number of failed verification attempts allowed
pub const MAX_ATTEMPTS: i32 = 5;

/// Default expiration time for challenges (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// Minimum seconds between verification attempts on one challenge
pub const VERIFY_THROTTLE_SECONDS: i64 = 30;

/// Minimum seconds between issue requests for the same target
pub const RESEND_COOLDOWN_SECONDS: i64 = 60;

/// Hours after expiry before a challenge row is purged
pub const PURGE_AFTER_HOURS: i64 = 24;

/// Purpose of a one-time-code challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChallengeKind {
    EmailVerification,
    PhoneVerification,
    PasswordReset,
}

impl ChallengeKind {
    /// Storage representation of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeKind::EmailVerification => "EMAIL_VERIFICATION",
            ChallengeKind::PhoneVerification => "PHONE_VERIFICATION",
            ChallengeKind::PasswordReset => "PASSWORD_RESET",
        }
    }
}

impl std::str::FromStr for ChallengeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EMAIL_VERIFICATION" => Ok(ChallengeKind::EmailVerification),
            "PHONE_VERIFICATION" => Ok(ChallengeKind::PhoneVerification),
            "PASSWORD_RESET" => Ok(ChallengeKind::PasswordReset),
            other => Err(format!("Unknown challenge kind: {}", other)),
        }
    }
}

/// A single outstanding proof-of-possession attempt
///
/// A challenge is usable while it is unused, unexpired and under the
/// attempt ceiling. The predicates take an explicit `now` so callers with
/// an injected clock stay deterministic; the argument-free variants exist
/// for convenience at the edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpChallenge {
    /// Unique identifier for the challenge
    pub id: Uuid,

    /// Principal this challenge belongs to
    pub principal_id: Uuid,

    /// The email or phone string the code was sent to
    pub target: String,

    /// Purpose of the challenge
    pub kind: ChallengeKind,

    /// The 4-digit verification code
    pub code: String,

    /// Timestamp when the challenge expires
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been successfully consumed
    pub is_used: bool,

    /// Number of failed verification attempts made
    pub attempt_count: i32,

    /// Timestamp of the last failed verification attempt
    pub last_attempt_at: Option<DateTime<Utc>>,

    /// Client IP captured at creation, if known
    pub ip_address: Option<String>,

    /// Timestamp when the challenge was created
    pub created_at: DateTime<Utc>,
}

impl OtpChallenge {
    /// Creates a new challenge with the default 10-minute expiry
    pub fn new(
        principal_id: Uuid,
        target: String,
        kind: ChallengeKind,
        code: String,
        ip_address: Option<String>,
    ) -> Self {
        Self::issued_at(
            principal_id,
            target,
            kind,
            code,
            ip_address,
            Utc::now(),
            DEFAULT_EXPIRATION_MINUTES,
        )
    }

    /// Creates a new challenge at an explicit instant with a custom expiry
    pub fn issued_at(
        principal_id: Uuid,
        target: String,
        kind: ChallengeKind,
        code: String,
        ip_address: Option<String>,
        now: DateTime<Utc>,
        expiration_minutes: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            principal_id,
            target,
            kind,
            code,
            expires_at: now + Duration::minutes(expiration_minutes),
            is_used: false,
            attempt_count: 0,
            last_attempt_at: None,
            ip_address,
            created_at: now,
        }
    }

    /// Checks if the challenge has expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Checks if the challenge has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Checks if the challenge is usable at the given instant
    ///
    /// A challenge is usable iff it has not been consumed, has not
    /// expired, and is under the attempt ceiling.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_used && !self.is_expired_at(now) && self.attempt_count < MAX_ATTEMPTS
    }

    /// Checks if the challenge is usable now
    pub fn is_usable(&self) -> bool {
        self.is_usable_at(Utc::now())
    }

    /// Checks if a verification attempt at `now` falls inside the
    /// throttle window after the previous attempt
    pub fn is_throttled_at(&self, now: DateTime<Utc>, throttle_seconds: i64) -> bool {
        match self.last_attempt_at {
            Some(last) => now - last < Duration::seconds(throttle_seconds),
            None => false,
        }
    }

    /// Checks whether a caller IP conflicts with the IP pinned at creation
    ///
    /// Only a conflict between two known addresses counts; a missing
    /// address on either side never blocks verification.
    pub fn ip_mismatch(&self, caller_ip: Option<&str>) -> bool {
        matches!(
            (self.ip_address.as_deref(), caller_ip),
            (Some(pinned), Some(caller)) if pinned != caller
        )
    }

    /// Records a failed code match
    pub fn record_failed_attempt(&mut self, now: DateTime<Utc>) {
        self.attempt_count += 1;
        self.last_attempt_at = Some(now);
    }

    /// Marks the challenge as consumed
    pub fn mark_used(&mut self) {
        self.is_used = true;
    }

    /// Gets the number of remaining verification attempts
    pub fn remaining_attempts(&self) -> i32 {
        (MAX_ATTEMPTS - self.attempt_count).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn challenge_at(now: DateTime<Utc>) -> OtpChallenge {
        OtpChallenge::issued_at(
            Uuid::new_v4(),
            "ahmad@example.com".to_string(),
            ChallengeKind::EmailVerification,
            "4821".to_string(),
            Some("203.0.113.7".to_string()),
            now,
            DEFAULT_EXPIRATION_MINUTES,
        )
    }

    #[test]
    fn test_new_challenge() {
        let challenge = OtpChallenge::new(
            Uuid::new_v4(),
            "+966512345678".to_string(),
            ChallengeKind::PhoneVerification,
            "0913".to_string(),
            None,
        );

        assert_eq!(challenge.code.len(), CODE_LENGTH);
        assert_eq!(challenge.attempt_count, 0);
        assert!(!challenge.is_used);
        assert!(challenge.last_attempt_at.is_none());
        assert!(challenge.is_usable());
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let challenge = challenge_at(now);

        assert!(!challenge.is_expired_at(now + Duration::minutes(9) + Duration::seconds(59)));
        assert!(challenge.is_expired_at(now + Duration::minutes(10) + Duration::seconds(1)));
        assert!(challenge.is_usable_at(now + Duration::minutes(9)));
        assert!(!challenge.is_usable_at(now + Duration::minutes(11)));
    }

    #[test]
    fn test_attempt_ceiling_makes_unusable() {
        let now = Utc::now();
        let mut challenge = challenge_at(now);

        for _ in 0..MAX_ATTEMPTS {
            challenge.record_failed_attempt(now);
        }

        assert_eq!(challenge.attempt_count, MAX_ATTEMPTS);
        assert_eq!(challenge.remaining_attempts(), 0);
        assert!(!challenge.is_usable_at(now));
    }

    #[test]
    fn test_consumed_challenge_unusable() {
        let now = Utc::now();
        let mut challenge = challenge_at(now);

        challenge.mark_used();
        assert!(!challenge.is_usable_at(now));
    }

    #[test]
    fn test_throttle_window() {
        let now = Utc::now();
        let mut challenge = challenge_at(now);

        assert!(!challenge.is_throttled_at(now, VERIFY_THROTTLE_SECONDS));

        challenge.record_failed_attempt(now);
        assert!(challenge.is_throttled_at(now + Duration::seconds(29), VERIFY_THROTTLE_SECONDS));
        assert!(!challenge.is_throttled_at(now + Duration::seconds(30), VERIFY_THROTTLE_SECONDS));
    }

    #[test]
    fn test_ip_mismatch() {
        let now = Utc::now();
        let challenge = challenge_at(now);

        assert!(challenge.ip_mismatch(Some("198.51.100.9")));
        assert!(!challenge.ip_mismatch(Some("203.0.113.7")));
        assert!(!challenge.ip_mismatch(None));

        let mut unpinned = challenge.clone();
        unpinned.ip_address = None;
        assert!(!unpinned.ip_mismatch(Some("198.51.100.9")));
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            ChallengeKind::EmailVerification,
            ChallengeKind::PhoneVerification,
            ChallengeKind::PasswordReset,
        ] {
            let parsed: ChallengeKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }
}
