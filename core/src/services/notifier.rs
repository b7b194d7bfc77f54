//! Notifier trait for code and welcome message delivery.
//!
//! The identity core only needs a capability that can put a short code in
//! front of the principal; the actual transport (SMTP, SMS gateway) lives
//! in the infrastructure layer. Delivery is best-effort everywhere: a
//! failed send is logged by the caller and never fails the operation that
//! triggered it, because the challenge row is already durable and a
//! resend stays possible.

use async_trait::async_trait;

use crate::domain::entities::otp_challenge::ChallengeKind;

/// Delivery channel for a one-time code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Email,
    Phone,
}

impl Channel {
    /// Pick the channel for a challenge
    ///
    /// Verification kinds name their channel; password resets go to
    /// whichever channel the target string belongs to.
    pub fn for_challenge(kind: ChallengeKind, target: &str) -> Self {
        match kind {
            ChallengeKind::EmailVerification => Channel::Email,
            ChallengeKind::PhoneVerification => Channel::Phone,
            ChallengeKind::PasswordReset => {
                if target.contains('@') {
                    Channel::Email
                } else {
                    Channel::Phone
                }
            }
        }
    }
}

/// Trait for outbound message delivery
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a one-time code to a target
    ///
    /// # Returns
    /// A provider message id on success, an error description on failure
    async fn send_code(
        &self,
        channel: Channel,
        target: &str,
        code: &str,
        kind: ChallengeKind,
    ) -> Result<String, String>;

    /// Deliver a welcome message once both channels are verified
    async fn send_welcome(&self, email: &str, name: &str) -> Result<(), String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_for_verification_kinds() {
        assert_eq!(
            Channel::for_challenge(ChallengeKind::EmailVerification, "a@b.com"),
            Channel::Email
        );
        assert_eq!(
            Channel::for_challenge(ChallengeKind::PhoneVerification, "+966512345678"),
            Channel::Phone
        );
    }

    #[test]
    fn test_channel_for_password_reset_follows_target() {
        assert_eq!(
            Channel::for_challenge(ChallengeKind::PasswordReset, "a@b.com"),
            Channel::Email
        );
        assert_eq!(
            Channel::for_challenge(ChallengeKind::PasswordReset, "+966512345678"),
            Channel::Phone
        );
    }
}
