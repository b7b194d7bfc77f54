//! Mock implementation of ChallengeRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::otp_challenge::{ChallengeKind, OtpChallenge};
use crate::errors::DomainError;

use super::trait_::ChallengeRepository;

/// Mock challenge repository for testing
pub struct MockChallengeRepository {
    challenges: Arc<RwLock<Vec<OtpChallenge>>>,
}

impl MockChallengeRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            challenges: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Number of stored challenges, used by cooldown tests
    pub async fn len(&self) -> usize {
        self.challenges.read().await.len()
    }

    /// Snapshot of a stored challenge by id, used to inspect counters
    pub async fn get(&self, id: uuid::Uuid) -> Option<OtpChallenge> {
        self.challenges
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }
}

impl Default for MockChallengeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChallengeRepository for MockChallengeRepository {
    async fn create(&self, challenge: OtpChallenge) -> Result<OtpChallenge, DomainError> {
        let mut challenges = self.challenges.write().await;
        challenges.push(challenge.clone());
        Ok(challenge)
    }

    async fn update(&self, challenge: OtpChallenge) -> Result<OtpChallenge, DomainError> {
        let mut challenges = self.challenges.write().await;

        if let Some(existing) = challenges.iter_mut().find(|c| c.id == challenge.id) {
            *existing = challenge.clone();
            Ok(challenge)
        } else {
            Err(DomainError::NotFound {
                resource: "OtpChallenge".to_string(),
            })
        }
    }

    async fn find_usable(
        &self,
        target: &str,
        kind: ChallengeKind,
        now: DateTime<Utc>,
    ) -> Result<Option<OtpChallenge>, DomainError> {
        let challenges = self.challenges.read().await;
        Ok(challenges
            .iter()
            .filter(|c| {
                c.target == target && c.kind == kind && !c.is_used && !c.is_expired_at(now)
            })
            .max_by_key(|c| c.created_at)
            .cloned())
    }

    async fn find_recent(
        &self,
        target: &str,
        kind: ChallengeKind,
        since: DateTime<Utc>,
    ) -> Result<Option<OtpChallenge>, DomainError> {
        let challenges = self.challenges.read().await;
        Ok(challenges
            .iter()
            .filter(|c| c.target == target && c.kind == kind && c.created_at > since)
            .max_by_key(|c| c.created_at)
            .cloned())
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut challenges = self.challenges.write().await;
        let before = challenges.len();
        challenges.retain(|c| c.expires_at >= cutoff);
        Ok((before - challenges.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn challenge_at(now: DateTime<Utc>, code: &str) -> OtpChallenge {
        OtpChallenge::issued_at(
            Uuid::new_v4(),
            "ahmad@example.com".to_string(),
            ChallengeKind::EmailVerification,
            code.to_string(),
            None,
            now,
            10,
        )
    }

    #[tokio::test]
    async fn test_find_usable_picks_most_recent() {
        let repo = MockChallengeRepository::new();
        let now = Utc::now();

        repo.create(challenge_at(now - Duration::seconds(90), "1111"))
            .await
            .unwrap();
        let newest = repo.create(challenge_at(now, "2222")).await.unwrap();

        let found = repo
            .find_usable("ahmad@example.com", ChallengeKind::EmailVerification, now)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, newest.id);
    }

    #[tokio::test]
    async fn test_find_usable_skips_consumed_and_expired() {
        let repo = MockChallengeRepository::new();
        let now = Utc::now();

        let mut used = challenge_at(now, "1111");
        used.mark_used();
        repo.create(used).await.unwrap();
        repo.create(challenge_at(now - Duration::minutes(30), "2222"))
            .await
            .unwrap();

        assert!(repo
            .find_usable("ahmad@example.com", ChallengeKind::EmailVerification, now)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_find_recent_honors_window() {
        let repo = MockChallengeRepository::new();
        let now = Utc::now();

        repo.create(challenge_at(now - Duration::seconds(90), "1111"))
            .await
            .unwrap();

        assert!(repo
            .find_recent(
                "ahmad@example.com",
                ChallengeKind::EmailVerification,
                now - Duration::seconds(60),
            )
            .await
            .unwrap()
            .is_none());
        assert!(repo
            .find_recent(
                "ahmad@example.com",
                ChallengeKind::EmailVerification,
                now - Duration::seconds(120),
            )
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_purge_older_than() {
        let repo = MockChallengeRepository::new();
        let now = Utc::now();

        repo.create(challenge_at(now - Duration::hours(26), "1111"))
            .await
            .unwrap();
        repo.create(challenge_at(now, "2222")).await.unwrap();

        let removed = repo
            .purge_older_than(now - Duration::hours(24))
            .await
            .unwrap();
        assert_eq!(removed, 1);
        assert_eq!(repo.len().await, 1);
    }
}
