//! Configuration for the challenge manager

use crate::domain::entities::otp_challenge::{
    DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS, PURGE_AFTER_HOURS, RESEND_COOLDOWN_SECONDS,
    VERIFY_THROTTLE_SECONDS,
};

/// Configuration for the challenge manager
#[derive(Debug, Clone)]
pub struct ChallengeServiceConfig {
    /// Number of minutes before a challenge expires
    pub code_expiration_minutes: i64,
    /// Maximum failed verification attempts per challenge
    pub max_attempts: i32,
    /// Minimum seconds between issue requests for the same target
    pub resend_cooldown_seconds: i64,
    /// Minimum seconds between verification attempts on one challenge
    pub verify_throttle_seconds: i64,
    /// Hours after expiry before a challenge row is purged
    pub purge_after_hours: i64,
}

impl Default for ChallengeServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            max_attempts: MAX_ATTEMPTS,
            resend_cooldown_seconds: RESEND_COOLDOWN_SECONDS,
            verify_throttle_seconds: VERIFY_THROTTLE_SECONDS,
            purge_after_hours: PURGE_AFTER_HOURS,
        }
    }
}

impl From<khidma_shared::config::OtpConfig> for ChallengeServiceConfig {
    fn from(config: khidma_shared::config::OtpConfig) -> Self {
        Self {
            code_expiration_minutes: config.code_expiration_minutes,
            max_attempts: config.max_attempts,
            resend_cooldown_seconds: config.resend_cooldown_seconds,
            verify_throttle_seconds: config.verify_throttle_seconds,
            purge_after_hours: config.purge_after_hours,
        }
    }
}
