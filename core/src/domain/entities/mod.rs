//! Domain entities representing core business objects.

pub mod otp_challenge;
pub mod principal;
pub mod token;

// Re-export commonly used types
pub use otp_challenge::{
    ChallengeKind, OtpChallenge, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS,
    PURGE_AFTER_HOURS, RESEND_COOLDOWN_SECONDS, VERIFY_THROTTLE_SECONDS,
};
pub use principal::{ActorKind, Principal, PrincipalStatus};
pub use token::{
    Claims, TokenPurpose, JWT_AUDIENCE, JWT_ISSUER, RESET_TOKEN_EXPIRY_MINUTES,
    SESSION_TOKEN_EXPIRY_DAYS,
};
