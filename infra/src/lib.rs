//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Khidma identity
//! services. It provides the concrete implementations behind the core's
//! repository and notifier traits:
//!
//! - **Database**: MySQL repositories using SQLx, parametrized by actor
//!   class (end users and administrators live in separate tables)
//! - **Notify**: notifier implementations; the real SMTP/SMS gateways are
//!   deployment concerns, the mock here logs instead of sending

use thiserror::Error;

pub mod database;
pub mod notify;

/// Errors raised by infrastructure services
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}
