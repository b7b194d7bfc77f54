//! Mock implementation of PrincipalRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::principal::Principal;
use crate::errors::{AuthError, DomainError};

use super::trait_::PrincipalRepository;

/// Mock principal repository for testing
pub struct MockPrincipalRepository {
    principals: Arc<RwLock<HashMap<Uuid, Principal>>>,
}

impl MockPrincipalRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            principals: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a mock repository seeded with an existing principal
    pub async fn with_existing(principal: Principal) -> Self {
        let repo = Self::new();
        repo.principals
            .write()
            .await
            .insert(principal.id, principal);
        repo
    }
}

impl Default for MockPrincipalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PrincipalRepository for MockPrincipalRepository {
    async fn find_by_email_or_phone(
        &self,
        identifier: &str,
    ) -> Result<Option<Principal>, DomainError> {
        let principals = self.principals.read().await;
        Ok(principals
            .values()
            .find(|p| p.email == identifier || p.phone == identifier)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Principal>, DomainError> {
        let principals = self.principals.read().await;
        Ok(principals.get(&id).cloned())
    }

    async fn create(&self, principal: Principal) -> Result<Principal, DomainError> {
        let mut principals = self.principals.write().await;

        // The write lock stands in for the storage-level unique index
        if principals
            .values()
            .any(|p| p.email == principal.email || p.phone == principal.phone)
        {
            return Err(DomainError::Auth(AuthError::DuplicatePrincipal));
        }

        principals.insert(principal.id, principal.clone());
        Ok(principal)
    }

    async fn update(&self, principal: Principal) -> Result<Principal, DomainError> {
        let mut principals = self.principals.write().await;

        if !principals.contains_key(&principal.id) {
            return Err(DomainError::NotFound {
                resource: "Principal".to_string(),
            });
        }

        principals.insert(principal.id, principal.clone());
        Ok(principal)
    }
}
