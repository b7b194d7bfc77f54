//! Mock implementations for testing the challenge manager

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::entities::otp_challenge::ChallengeKind;
use crate::services::notifier::{Channel, Notifier};

/// A delivered code captured by the recording notifier
#[derive(Debug, Clone)]
pub struct SentCode {
    pub channel: Channel,
    pub target: String,
    pub code: String,
    pub kind: ChallengeKind,
}

/// Notifier that records every message instead of sending it
pub struct RecordingNotifier {
    pub sent_codes: Arc<Mutex<Vec<SentCode>>>,
    pub welcomes: Arc<Mutex<Vec<(String, String)>>>,
    fail_sends: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            sent_codes: Arc::new(Mutex::new(Vec::new())),
            welcomes: Arc::new(Mutex::new(Vec::new())),
            fail_sends: false,
        }
    }

    /// A notifier whose every send fails
    pub fn failing() -> Self {
        Self {
            fail_sends: true,
            ..Self::new()
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent_codes.lock().unwrap().len()
    }

    pub fn welcome_count(&self) -> usize {
        self.welcomes.lock().unwrap().len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_code(
        &self,
        channel: Channel,
        target: &str,
        code: &str,
        kind: ChallengeKind,
    ) -> Result<String, String> {
        if self.fail_sends {
            return Err("simulated delivery failure".to_string());
        }
        self.sent_codes.lock().unwrap().push(SentCode {
            channel,
            target: target.to_string(),
            code: code.to_string(),
            kind,
        });
        Ok(format!("mock-{}", self.sent_count()))
    }

    async fn send_welcome(&self, email: &str, name: &str) -> Result<(), String> {
        if self.fail_sends {
            return Err("simulated delivery failure".to_string());
        }
        self.welcomes
            .lock()
            .unwrap()
            .push((email.to_string(), name.to_string()));
        Ok(())
    }
}
