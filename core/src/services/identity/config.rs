//! Configuration for the identity service

/// Configuration for the identity service
#[derive(Debug, Clone)]
pub struct IdentityServiceConfig {
    /// Bcrypt cost factor for password hashing
    pub bcrypt_cost: u32,
    /// Minimum accepted password length
    pub min_password_length: usize,
}

impl Default for IdentityServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: 10,
            min_password_length: 8,
        }
    }
}
