//! One-time-code configuration

use serde::{Deserialize, Serialize};

/// Configuration for one-time-code issuance and verification windows
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of minutes before a code expires
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

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: 10,
            max_attempts: 5,
            resend_cooldown_seconds: 60,
            verify_throttle_seconds: 30,
            purge_after_hours: 24,
        }
    }
}

impl OtpConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `OTP_EXPIRATION_MINUTES`, `OTP_MAX_ATTEMPTS` and
    /// `OTP_RESEND_COOLDOWN_SECONDS`, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_expiration_minutes: std::env::var("OTP_EXPIRATION_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.code_expiration_minutes),
            max_attempts: std::env::var("OTP_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_attempts),
            resend_cooldown_seconds: std::env::var("OTP_RESEND_COOLDOWN_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.resend_cooldown_seconds),
            verify_throttle_seconds: defaults.verify_throttle_seconds,
            purge_after_hours: defaults.purge_after_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_windows() {
        let config = OtpConfig::default();
        assert_eq!(config.code_expiration_minutes, 10);
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.resend_cooldown_seconds, 60);
        assert_eq!(config.verify_throttle_seconds, 30);
        assert_eq!(config.purge_after_hours, 24);
    }
}
