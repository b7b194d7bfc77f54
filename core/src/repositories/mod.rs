//! Repository interfaces for the identity core.
//!
//! Concrete implementations live in the infrastructure layer; the mocks
//! here back the service test suites.

pub mod challenge;
pub mod principal;

pub use challenge::{ChallengeRepository, MockChallengeRepository};
pub use principal::{MockPrincipalRepository, PrincipalRepository};
