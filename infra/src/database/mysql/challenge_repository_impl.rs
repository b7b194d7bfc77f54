//! MySQL implementation of the ChallengeRepository trait.
//!
//! Challenge rows follow their owning actor class: end-user challenges
//! live in `otps`, administrator challenges in `admin_otps`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use khidma_core::domain::entities::otp_challenge::{ChallengeKind, OtpChallenge};
use khidma_core::domain::entities::principal::ActorKind;
use khidma_core::errors::DomainError;
use khidma_core::repositories::ChallengeRepository;

/// MySQL implementation of ChallengeRepository
pub struct MySqlChallengeRepository {
    /// Database connection pool
    pool: MySqlPool,
    /// Table backing this actor class
    table: &'static str,
}

impl MySqlChallengeRepository {
    /// Create a repository for one actor class
    pub fn new(pool: MySqlPool, actor: ActorKind) -> Self {
        let table = match actor {
            ActorKind::EndUser => "otps",
            ActorKind::Administrator => "admin_otps",
        };
        Self { pool, table }
    }

    /// Convert a database row to an OtpChallenge entity
    fn row_to_challenge(row: &sqlx::mysql::MySqlRow) -> Result<OtpChallenge, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;
        let principal_id: String =
            row.try_get("principal_id")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get principal_id: {}", e),
                })?;
        let kind: String = row.try_get("kind").map_err(|e| DomainError::Internal {
            message: format!("Failed to get kind: {}", e),
        })?;

        Ok(OtpChallenge {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid challenge UUID: {}", e),
            })?,
            principal_id: Uuid::parse_str(&principal_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid principal UUID: {}", e),
            })?,
            target: row.try_get("target").map_err(|e| DomainError::Internal {
                message: format!("Failed to get target: {}", e),
            })?,
            kind: kind.parse::<ChallengeKind>().map_err(|e| DomainError::Internal {
                message: e,
            })?,
            code: row.try_get("code").map_err(|e| DomainError::Internal {
                message: format!("Failed to get code: {}", e),
            })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
            is_used: row.try_get("is_used").map_err(|e| DomainError::Internal {
                message: format!("Failed to get is_used: {}", e),
            })?,
            attempt_count: row
                .try_get("attempt_count")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get attempt_count: {}", e),
                })?,
            last_attempt_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_attempt_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get last_attempt_at: {}", e),
                })?,
            ip_address: row
                .try_get::<Option<String>, _>("ip_address")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get ip_address: {}", e),
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl ChallengeRepository for MySqlChallengeRepository {
    async fn create(&self, challenge: OtpChallenge) -> Result<OtpChallenge, DomainError> {
        let query = format!(
            r#"
            INSERT INTO {} (
                id, principal_id, target, kind, code, expires_at, is_used,
                attempt_count, last_attempt_at, ip_address, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            self.table
        );

        sqlx::query(&query)
            .bind(challenge.id.to_string())
            .bind(challenge.principal_id.to_string())
            .bind(&challenge.target)
            .bind(challenge.kind.as_str())
            .bind(&challenge.code)
            .bind(challenge.expires_at)
            .bind(challenge.is_used)
            .bind(challenge.attempt_count)
            .bind(challenge.last_attempt_at)
            .bind(&challenge.ip_address)
            .bind(challenge.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to save challenge: {}", e),
            })?;

        Ok(challenge)
    }

    async fn update(&self, challenge: OtpChallenge) -> Result<OtpChallenge, DomainError> {
        let query = format!(
            r#"
            UPDATE {}
            SET is_used = ?, attempt_count = ?, last_attempt_at = ?
            WHERE id = ?
            "#,
            self.table
        );

        let result = sqlx::query(&query)
            .bind(challenge.is_used)
            .bind(challenge.attempt_count)
            .bind(challenge.last_attempt_at)
            .bind(challenge.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to update challenge: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "OtpChallenge".to_string(),
            });
        }

        Ok(challenge)
    }

    async fn find_usable(
        &self,
        target: &str,
        kind: ChallengeKind,
        now: DateTime<Utc>,
    ) -> Result<Option<OtpChallenge>, DomainError> {
        let query = format!(
            r#"
            SELECT id, principal_id, target, kind, code, expires_at, is_used,
                   attempt_count, last_attempt_at, ip_address, created_at
            FROM {}
            WHERE target = ? AND kind = ? AND is_used = FALSE AND expires_at > ?
            ORDER BY created_at DESC
            LIMIT 1
            "#,
            self.table
        );

        let result = sqlx::query(&query)
            .bind(target)
            .bind(kind.as_str())
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find challenge: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_challenge(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_recent(
        &self,
        target: &str,
        kind: ChallengeKind,
        since: DateTime<Utc>,
    ) -> Result<Option<OtpChallenge>, DomainError> {
        let query = format!(
            r#"
            SELECT id, principal_id, target, kind, code, expires_at, is_used,
                   attempt_count, last_attempt_at, ip_address, created_at
            FROM {}
            WHERE target = ? AND kind = ? AND created_at > ?
            ORDER BY created_at DESC
            LIMIT 1
            "#,
            self.table
        );

        let result = sqlx::query(&query)
            .bind(target)
            .bind(kind.as_str())
            .bind(since)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find recent challenge: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_challenge(&row)?)),
            None => Ok(None),
        }
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let query = format!("DELETE FROM {} WHERE expires_at < ?", self.table);

        let result = sqlx::query(&query)
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to purge challenges: {}", e),
            })?;

        Ok(result.rows_affected())
    }
}
