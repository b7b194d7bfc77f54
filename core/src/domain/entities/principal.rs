//! Principal entity representing an authenticatable identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Actor class a principal belongs to
///
/// End users and administrators authenticate through the same flows but
/// live in separate stores; repositories are parametrized by this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    /// A marketplace end user (customer or provider)
    EndUser,
    /// A back-office administrator
    Administrator,
}

impl ActorKind {
    /// Short tag used in logs and token claims
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorKind::EndUser => "user",
            ActorKind::Administrator => "admin",
        }
    }
}

impl std::fmt::Display for ActorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account status of a principal
///
/// Status transitions happen outside the identity core (activation,
/// suspension, approval); login treats anything other than `Active` as a
/// closed door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrincipalStatus {
    Active,
    Inactive,
    Suspended,
    PendingApproval,
}

impl PrincipalStatus {
    /// Storage representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalStatus::Active => "ACTIVE",
            PrincipalStatus::Inactive => "INACTIVE",
            PrincipalStatus::Suspended => "SUSPENDED",
            PrincipalStatus::PendingApproval => "PENDING_APPROVAL",
        }
    }
}

impl std::str::FromStr for PrincipalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(PrincipalStatus::Active),
            "INACTIVE" => Ok(PrincipalStatus::Inactive),
            "SUSPENDED" => Ok(PrincipalStatus::Suspended),
            "PENDING_APPROVAL" => Ok(PrincipalStatus::PendingApproval),
            other => Err(format!("Unknown principal status: {}", other)),
        }
    }
}

/// Principal entity representing a registered identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Unique identifier for the principal
    pub id: Uuid,

    /// Display name, used when addressing the principal in notifications
    pub name: String,

    /// Email address, unique within the actor class
    pub email: String,

    /// Phone number, unique within the actor class
    pub phone: String,

    /// Bcrypt hash of the password; never serialized outward
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Whether the email address has been proven via OTP
    pub email_verified: bool,

    /// Whether the phone number has been proven via OTP
    pub phone_verified: bool,

    /// Account status
    pub status: PrincipalStatus,

    /// Authorization tag, opaque to the identity core
    pub role: String,

    /// Timestamp when the principal was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the principal was last updated
    pub updated_at: DateTime<Utc>,
}

impl Principal {
    /// Creates a new principal with both verification flags cleared
    pub fn new(
        name: String,
        email: String,
        phone: String,
        password_hash: String,
        role: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone,
            password_hash,
            email_verified: false,
            phone_verified: false,
            status: PrincipalStatus::Active,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the email address as verified
    pub fn verify_email(&mut self) {
        self.email_verified = true;
        self.updated_at = Utc::now();
    }

    /// Marks the phone number as verified
    pub fn verify_phone(&mut self) {
        self.phone_verified = true;
        self.updated_at = Utc::now();
    }

    /// Checks whether both channels have been verified
    pub fn is_fully_verified(&self) -> bool {
        self.email_verified && self.phone_verified
    }

    /// Checks whether the account may log in
    pub fn is_active(&self) -> bool {
        self.status == PrincipalStatus::Active
    }

    /// Replaces the password hash
    pub fn set_password_hash(&mut self, hash: String) {
        self.password_hash = hash;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_principal() -> Principal {
        Principal::new(
            "Ahmad".to_string(),
            "ahmad@example.com".to_string(),
            "+966512345678".to_string(),
            "$2b$10$hash".to_string(),
            "USER".to_string(),
        )
    }

    #[test]
    fn test_new_principal() {
        let principal = sample_principal();

        assert_eq!(principal.email, "ahmad@example.com");
        assert_eq!(principal.phone, "+966512345678");
        assert!(!principal.email_verified);
        assert!(!principal.phone_verified);
        assert!(!principal.is_fully_verified());
        assert_eq!(principal.status, PrincipalStatus::Active);
        assert!(principal.is_active());
    }

    #[test]
    fn test_verification_flags() {
        let mut principal = sample_principal();

        principal.verify_email();
        assert!(principal.email_verified);
        assert!(!principal.is_fully_verified());

        principal.verify_phone();
        assert!(principal.phone_verified);
        assert!(principal.is_fully_verified());
    }

    #[test]
    fn test_inactive_statuses() {
        let mut principal = sample_principal();

        for status in [
            PrincipalStatus::Inactive,
            PrincipalStatus::Suspended,
            PrincipalStatus::PendingApproval,
        ] {
            principal.status = status;
            assert!(!principal.is_active());
        }
    }

    #[test]
    fn test_set_password_hash() {
        let mut principal = sample_principal();
        principal.set_password_hash("$2b$10$other".to_string());
        assert_eq!(principal.password_hash, "$2b$10$other");
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            PrincipalStatus::Active,
            PrincipalStatus::Inactive,
            PrincipalStatus::Suspended,
            PrincipalStatus::PendingApproval,
        ] {
            let parsed: PrincipalStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("BANNED".parse::<PrincipalStatus>().is_err());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let principal = sample_principal();
        let json = serde_json::to_string(&principal).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("$2b$10$hash"));
    }
}
