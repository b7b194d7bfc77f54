//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing and token lifetime configuration
//! - `otp` - One-time-code expiry, attempt, and cooldown windows
//! - `database` - Database connection and pool configuration

pub mod auth;
pub mod database;
pub mod otp;

// Re-export commonly used types
pub use auth::JwtConfig;
pub use database::DatabaseConfig;
pub use otp::OtpConfig;
