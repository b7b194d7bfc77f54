//! Registration request value object.

use serde::{Deserialize, Serialize};

/// Input for registering a new principal
///
/// The transport layer is responsible for field-level format validation;
/// the identity service only enforces the minimum password length and
/// uniqueness rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Phone number
    pub phone: String,

    /// Plain-text password; hashed before it is stored
    pub password: String,

    /// Authorization tag, opaque to the identity core
    pub role: String,
}
