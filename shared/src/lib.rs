//! Shared utilities and common types for the Khidma server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types (JWT, OTP, database)
//! - Identifier utilities (email/phone classification and masking)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{DatabaseConfig, JwtConfig, OtpConfig};
pub use utils::masking;
