//! Authentication response value object.

use serde::{Deserialize, Serialize};

use crate::domain::entities::principal::Principal;

/// Response returned after a successful login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// JWT session token for subsequent requests
    pub access_token: String,

    /// Session token expiration time in seconds
    pub expires_in: i64,

    /// The authenticated principal
    pub principal: Principal,
}

impl AuthResponse {
    /// Creates a new authentication response
    pub fn new(access_token: String, expires_in: i64, principal: Principal) -> Self {
        Self {
            access_token,
            expires_in,
            principal,
        }
    }
}
