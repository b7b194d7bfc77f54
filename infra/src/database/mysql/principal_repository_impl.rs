//! MySQL implementation of the PrincipalRepository trait.
//!
//! One repository instance serves one actor class: end users live in the
//! `users` table, administrators in `admins`. Both tables carry unique
//! indexes on email and phone; the duplicate-key conflict those indexes
//! raise is the authoritative signal for the registration race and is
//! translated to `DuplicatePrincipal` here.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use khidma_core::domain::entities::principal::{ActorKind, Principal, PrincipalStatus};
use khidma_core::errors::{AuthError, DomainError};
use khidma_core::repositories::PrincipalRepository;

/// MySQL implementation of PrincipalRepository
pub struct MySqlPrincipalRepository {
    /// Database connection pool
    pool: MySqlPool,
    /// Table backing this actor class
    table: &'static str,
}

impl MySqlPrincipalRepository {
    /// Create a repository for one actor class
    pub fn new(pool: MySqlPool, actor: ActorKind) -> Self {
        let table = match actor {
            ActorKind::EndUser => "users",
            ActorKind::Administrator => "admins",
        };
        Self { pool, table }
    }

    /// Convert a database row to a Principal entity
    fn row_to_principal(row: &sqlx::mysql::MySqlRow) -> Result<Principal, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to get id: {}", e),
            })?;
        let status: String = row
            .try_get("status")
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to get status: {}", e),
            })?;

        Ok(Principal {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid principal UUID: {}", e),
            })?,
            name: row.try_get("name").map_err(|e| DomainError::Internal {
                message: format!("Failed to get name: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Internal {
                message: format!("Failed to get email: {}", e),
            })?,
            phone: row.try_get("phone").map_err(|e| DomainError::Internal {
                message: format!("Failed to get phone: {}", e),
            })?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get password_hash: {}", e),
                })?,
            email_verified: row
                .try_get("email_verified")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get email_verified: {}", e),
                })?,
            phone_verified: row
                .try_get("phone_verified")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get phone_verified: {}", e),
                })?,
            status: status.parse().map_err(|e: String| DomainError::Internal {
                message: e,
            })?,
            role: row.try_get("role").map_err(|e| DomainError::Internal {
                message: format!("Failed to get role: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
        })
    }

    /// Translate a storage error, surfacing unique-index conflicts
    fn map_write_error(error: sqlx::Error) -> DomainError {
        if let sqlx::Error::Database(ref db_error) = error {
            if db_error.is_unique_violation() {
                return DomainError::Auth(AuthError::DuplicatePrincipal);
            }
        }
        DomainError::Internal {
            message: format!("Failed to write principal: {}", error),
        }
    }
}

#[async_trait]
impl PrincipalRepository for MySqlPrincipalRepository {
    async fn find_by_email_or_phone(
        &self,
        identifier: &str,
    ) -> Result<Option<Principal>, DomainError> {
        let query = format!(
            r#"
            SELECT id, name, email, phone, password_hash, email_verified,
                   phone_verified, status, role, created_at, updated_at
            FROM {}
            WHERE email = ? OR phone = ?
            LIMIT 1
            "#,
            self.table
        );

        let result = sqlx::query(&query)
            .bind(identifier)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find principal: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_principal(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Principal>, DomainError> {
        let query = format!(
            r#"
            SELECT id, name, email, phone, password_hash, email_verified,
                   phone_verified, status, role, created_at, updated_at
            FROM {}
            WHERE id = ?
            LIMIT 1
            "#,
            self.table
        );

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find principal by id: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_principal(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, principal: Principal) -> Result<Principal, DomainError> {
        let query = format!(
            r#"
            INSERT INTO {} (
                id, name, email, phone, password_hash, email_verified,
                phone_verified, status, role, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            self.table
        );

        sqlx::query(&query)
            .bind(principal.id.to_string())
            .bind(&principal.name)
            .bind(&principal.email)
            .bind(&principal.phone)
            .bind(&principal.password_hash)
            .bind(principal.email_verified)
            .bind(principal.phone_verified)
            .bind(principal.status.as_str())
            .bind(&principal.role)
            .bind(principal.created_at)
            .bind(principal.updated_at)
            .execute(&self.pool)
            .await
            .map_err(Self::map_write_error)?;

        Ok(principal)
    }

    async fn update(&self, principal: Principal) -> Result<Principal, DomainError> {
        let query = format!(
            r#"
            UPDATE {}
            SET name = ?, email = ?, phone = ?, password_hash = ?,
                email_verified = ?, phone_verified = ?, status = ?,
                role = ?, updated_at = ?
            WHERE id = ?
            "#,
            self.table
        );

        let result = sqlx::query(&query)
            .bind(&principal.name)
            .bind(&principal.email)
            .bind(&principal.phone)
            .bind(&principal.password_hash)
            .bind(principal.email_verified)
            .bind(principal.phone_verified)
            .bind(principal.status.as_str())
            .bind(&principal.role)
            .bind(principal.updated_at)
            .bind(principal.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(Self::map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "Principal".to_string(),
            });
        }

        Ok(principal)
    }
}
