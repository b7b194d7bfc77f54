//! Challenge manager module for one-time-code verification
//!
//! This module provides the complete OTP workflow:
//! - Code generation and delivery hand-off
//! - Resend cooldown enforcement
//! - Verification with attempt tracking, throttling, and IP pinning
//! - Expired-challenge hygiene

mod code_generator;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use code_generator::{CodeGenerator, FixedCodeGenerator, SecureCodeGenerator};
pub use config::ChallengeServiceConfig;
pub use service::ChallengeService;
