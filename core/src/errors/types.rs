//! Domain-specific error types for authentication and related operations
//!
//! This module provides error types with bilingual support (English and
//! Arabic) for authentication, token management, and validation
//! operations. Every variant is caller-visible; none are retried
//! internally.

use thiserror::Error;

/// Authentication-related errors with bilingual messages
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials | بيانات الاعتماد غير صحيحة")]
    InvalidCredentials,

    #[error("Account not verified | لم يتم التحقق من الحساب")]
    AccountNotVerified,

    #[error("Account is not active | الحساب غير نشط")]
    AccountDisabled,

    #[error("Account not found | الحساب غير موجود")]
    PrincipalNotFound,

    #[error("Account already exists | الحساب موجود بالفعل")]
    DuplicatePrincipal,

    #[error("Invalid verification code | رمز التحقق غير صحيح")]
    InvalidCode,

    #[error("Verification code is invalid or has expired | رمز التحقق غير صالح أو منتهي الصلاحية")]
    ChallengeExpiredOrMissing,

    #[error("Too many verification attempts. Please request a new code | عدد كبير من المحاولات، يرجى طلب رمز جديد")]
    TooManyAttempts,

    #[error("Please wait before trying again | يرجى الانتظار قبل المحاولة مرة أخرى")]
    Throttled,

    #[error("Verification request origin mismatch | عدم تطابق مصدر طلب التحقق")]
    IpMismatch,

    #[error("Too many code requests. Please wait before requesting a new code | عدد كبير من طلبات الرمز، يرجى الانتظار قبل طلب رمز جديد")]
    TooManyResendRequests,
}

impl AuthError {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::AccountNotVerified => "ACCOUNT_NOT_VERIFIED",
            AuthError::AccountDisabled => "ACCOUNT_DISABLED",
            AuthError::PrincipalNotFound => "PRINCIPAL_NOT_FOUND",
            AuthError::DuplicatePrincipal => "DUPLICATE_PRINCIPAL",
            AuthError::InvalidCode => "INVALID_CODE",
            AuthError::ChallengeExpiredOrMissing => "CHALLENGE_EXPIRED_OR_MISSING",
            AuthError::TooManyAttempts => "TOO_MANY_ATTEMPTS",
            AuthError::Throttled => "THROTTLED",
            AuthError::IpMismatch => "IP_MISMATCH",
            AuthError::TooManyResendRequests => "TOO_MANY_RESEND_REQUESTS",
        }
    }
}

/// Token-related errors with bilingual messages
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is invalid or has expired | الرمز غير صالح أو منتهي الصلاحية")]
    InvalidOrExpired,

    #[error("Token cannot be used for this operation | لا يمكن استخدام الرمز لهذه العملية")]
    WrongPurpose,

    #[error("Token generation failed | فشل إنشاء الرمز")]
    GenerationFailed,
}

impl TokenError {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::InvalidOrExpired => "INVALID_OR_EXPIRED_TOKEN",
            TokenError::WrongPurpose => "WRONG_TOKEN_PURPOSE",
            TokenError::GenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }
}

/// Validation errors with bilingual messages
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Password must be at least {min} characters | يجب أن تتكون كلمة المرور من {min} أحرف على الأقل")]
    PasswordTooShort { min: usize },

    #[error("Invalid format for field: {field} | صيغة غير صحيحة للحقل: {field}")]
    InvalidFormat { field: String },
}

/// Helper function to extract the English half of a bilingual message
pub fn extract_english_message(message: &str) -> &str {
    message.split(" | ").next().unwrap_or(message)
}

/// Helper function to extract the Arabic half of a bilingual message
pub fn extract_arabic_message(message: &str) -> &str {
    message.split(" | ").nth(1).unwrap_or(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_messages_bilingual() {
        let message = AuthError::InvalidCredentials.to_string();
        assert!(message.contains("Invalid credentials"));
        assert!(message.contains("بيانات الاعتماد غير صحيحة"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AuthError::Throttled.error_code(), "THROTTLED");
        assert_eq!(
            AuthError::TooManyResendRequests.error_code(),
            "TOO_MANY_RESEND_REQUESTS"
        );
        assert_eq!(
            TokenError::InvalidOrExpired.error_code(),
            "INVALID_OR_EXPIRED_TOKEN"
        );
    }

    #[test]
    fn test_validation_error_interpolation() {
        let message = ValidationError::PasswordTooShort { min: 8 }.to_string();
        assert!(message.contains('8'));
    }

    #[test]
    fn test_message_extraction() {
        let bilingual = "Invalid verification code | رمز التحقق غير صحيح";
        assert_eq!(extract_english_message(bilingual), "Invalid verification code");
        assert_eq!(extract_arabic_message(bilingual), "رمز التحقق غير صحيح");

        let english_only = "Only English";
        assert_eq!(extract_english_message(english_only), "Only English");
    }
}
