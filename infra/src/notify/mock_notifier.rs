//! Mock notifier implementation
//!
//! Logs messages instead of delivering them. Used for development and
//! testing; tracks a send counter and can simulate delivery failures.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use khidma_core::domain::entities::otp_challenge::ChallengeKind;
use khidma_core::services::notifier::{Channel, Notifier};
use khidma_shared::utils::masking::mask_identifier;

/// Notifier that logs messages to the tracing output
#[derive(Clone)]
pub struct MockNotifier {
    /// Counter for messages "sent"
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
}

impl MockNotifier {
    /// Create a new mock notifier
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
        }
    }

    /// Create a mock notifier that fails every send
    pub fn failing() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: true,
        }
    }

    /// Get the total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send_code(
        &self,
        channel: Channel,
        target: &str,
        code: &str,
        kind: ChallengeKind,
    ) -> Result<String, String> {
        if self.simulate_failure {
            warn!(
                recipient = %mask_identifier(target),
                event = "mock_delivery_failure",
                "Mock notifier simulating delivery failure"
            );
            return Err("Simulated delivery failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        self.message_count.fetch_add(1, Ordering::SeqCst);

        info!(
            channel = ?channel,
            recipient = %mask_identifier(target),
            kind = kind.as_str(),
            code = code,
            message_id = %message_id,
            event = "mock_code_sent",
            "Mock notifier delivered verification code"
        );

        Ok(message_id)
    }

    async fn send_welcome(&self, email: &str, name: &str) -> Result<(), String> {
        if self.simulate_failure {
            return Err("Simulated delivery failure".to_string());
        }

        self.message_count.fetch_add(1, Ordering::SeqCst);

        info!(
            email = %mask_identifier(email),
            name = name,
            event = "mock_welcome_sent",
            "Mock notifier delivered welcome message"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_code_returns_message_id() {
        let notifier = MockNotifier::new();

        let message_id = notifier
            .send_code(
                Channel::Email,
                "ahmad@example.com",
                "4821",
                ChallengeKind::EmailVerification,
            )
            .await
            .unwrap();

        assert!(message_id.starts_with("mock_"));
        assert_eq!(notifier.message_count(), 1);
    }

    #[tokio::test]
    async fn test_failing_notifier() {
        let notifier = MockNotifier::failing();

        let result = notifier
            .send_code(
                Channel::Phone,
                "+966512345678",
                "4821",
                ChallengeKind::PhoneVerification,
            )
            .await;

        assert!(result.is_err());
        assert_eq!(notifier.message_count(), 0);

        assert!(notifier.send_welcome("a@b.com", "Ahmad").await.is_err());
    }

    #[tokio::test]
    async fn test_welcome_counted() {
        let notifier = MockNotifier::new();
        notifier.send_welcome("a@b.com", "Ahmad").await.unwrap();
        assert_eq!(notifier.message_count(), 1);
    }
}
