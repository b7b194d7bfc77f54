//! Value objects exchanged with the surrounding transport layer.

pub mod auth_response;
pub mod registration;

pub use auth_response::AuthResponse;
pub use registration::RegisterRequest;
