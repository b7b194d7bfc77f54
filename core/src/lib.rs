//! # Khidma Core
//!
//! Core business logic and domain layer for the Khidma backend.
//! This crate contains domain entities, business services, repository
//! interfaces, and error types that form the identity subsystem:
//! registration with dual-channel OTP verification, login, and
//! password recovery for both end users and administrators.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
