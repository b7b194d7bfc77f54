//! Principal repository trait defining the interface for credential persistence.
//!
//! This trait defines the contract for data access operations on
//! principals. One repository instance serves one actor class; the same
//! interface backs both the end-user and the administrator store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::principal::Principal;
use crate::errors::DomainError;

/// Repository trait for Principal entity persistence operations
///
/// Implementations must enforce uniqueness of email and phone within the
/// actor class at the storage layer and translate the resulting conflict
/// into `AuthError::DuplicatePrincipal`. The application-level existence
/// check that precedes an insert is advisory, not atomic.
#[async_trait]
pub trait PrincipalRepository: Send + Sync {
    /// Find a principal whose email or phone equals the identifier
    ///
    /// # Arguments
    /// * `identifier` - An email address or phone number
    ///
    /// # Returns
    /// * `Ok(Some(Principal))` - A principal owns the identifier
    /// * `Ok(None)` - No match in this actor class
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_email_or_phone(
        &self,
        identifier: &str,
    ) -> Result<Option<Principal>, DomainError>;

    /// Find a principal by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Principal>, DomainError>;

    /// Create a new principal
    ///
    /// # Returns
    /// * `Ok(Principal)` - The created principal
    /// * `Err(DomainError::Auth(DuplicatePrincipal))` - Email or phone
    ///   already taken within the actor class
    async fn create(&self, principal: Principal) -> Result<Principal, DomainError>;

    /// Update an existing principal
    ///
    /// # Returns
    /// * `Ok(Principal)` - The updated principal
    /// * `Err(DomainError)` - Principal missing or storage error
    async fn update(&self, principal: Principal) -> Result<Principal, DomainError>;
}
